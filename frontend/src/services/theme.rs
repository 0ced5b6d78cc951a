use shared::session::THEME_STORAGE_KEY;
use shared::Theme;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Theme saved by a previous visit, light if none
pub fn load_theme() -> Theme {
    let stored = local_storage().and_then(|s| s.get_item(THEME_STORAGE_KEY).ok().flatten());
    Theme::from_stored(stored.as_deref())
}

pub fn save_theme(theme: Theme) {
    if let Some(storage) = local_storage() {
        if storage.set_item(THEME_STORAGE_KEY, theme.as_str()).is_err() {
            log::warn!("Could not persist theme preference");
        }
    }
}

/// Toggle the `dark` class on the document element
pub fn apply_theme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.class_list().toggle_with_force("dark", theme.is_dark());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_theme_persists() {
        save_theme(Theme::Dark);
        assert_eq!(load_theme(), Theme::Dark);
        save_theme(Theme::Light);
        assert_eq!(load_theme(), Theme::Light);
    }

    #[wasm_bindgen_test]
    fn test_apply_theme_toggles_class() {
        apply_theme(Theme::Dark);
        let root = web_sys::window().unwrap().document().unwrap().document_element().unwrap();
        assert!(root.class_list().contains("dark"));
        apply_theme(Theme::Light);
        assert!(!root.class_list().contains("dark"));
    }
}
