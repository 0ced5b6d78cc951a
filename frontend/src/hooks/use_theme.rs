use shared::Theme;
use yew::prelude::*;

use crate::services::theme::{apply_theme, load_theme, save_theme};

#[derive(Clone)]
pub struct UseThemeResult {
    pub theme: Theme,
    pub toggle: Callback<()>,
}

#[hook]
pub fn use_theme() -> UseThemeResult {
    let theme = use_state(load_theme);

    use_effect_with(*theme, |theme| {
        apply_theme(*theme);
        save_theme(*theme);
    });

    let toggle = {
        let theme = theme.clone();
        Callback::from(move |_| theme.set(theme.toggled()))
    };

    UseThemeResult {
        theme: *theme,
        toggle,
    }
}
