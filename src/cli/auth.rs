use crate::vk;

pub fn auth(open_browser: bool) {
    vk::auth::auth(open_browser);
}
