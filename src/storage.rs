use starfield_core::prefs::{InteractionBundle, BUNDLE_KEY, THEME_KEY};
use starfield_core::Theme;
use web_sys as web;

#[inline]
fn local_storage() -> Option<web::Storage> {
    web::window()?.local_storage().ok().flatten()
}

fn get(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok().flatten()
}

fn set(key: &str, value: &str) {
    match local_storage() {
        Some(s) => {
            if let Err(e) = s.set_item(key, value) {
                log::warn!("[prefs] could not persist {}: {:?}", key, e);
            }
        }
        None => log::debug!("[prefs] no localStorage, {} not saved", key),
    }
}

pub fn saved_theme() -> Option<String> {
    get(THEME_KEY)
}

pub fn save_theme(theme: Theme) {
    set(THEME_KEY, theme.as_str());
}

pub fn load_bundle() -> InteractionBundle {
    InteractionBundle::load(get(BUNDLE_KEY).as_deref())
}

pub fn save_bundle(bundle: &InteractionBundle) {
    match bundle.to_json() {
        Ok(json) => set(BUNDLE_KEY, &json),
        Err(e) => log::warn!("[prefs] {}", e),
    }
}
