//! Read-only view of the identity provider's browser SDK.
//!
//! The hosting page loads the provider's script, which exposes a global
//! `Clerk` object. Only `isSignedIn` and the primary email address are read.

use js_sys::{Function, Reflect};
use shared::Identity;
use wasm_bindgen::{JsCast, JsValue};

fn lookup(root: &JsValue, path: &[&str]) -> Option<JsValue> {
    path.iter().try_fold(root.clone(), |value, key| {
        let next = Reflect::get(&value, &JsValue::from_str(key)).ok()?;
        if next.is_undefined() || next.is_null() {
            None
        } else {
            Some(next)
        }
    })
}

/// Identity as currently reported by the SDK; anonymous until it has loaded
pub fn current_identity() -> Identity {
    let Some(clerk) = clerk() else {
        return Identity::anonymous();
    };

    let signed_in = lookup(&clerk, &["isSignedIn"])
        .and_then(|v| v.as_bool())
        .unwrap_or(false);
    let email = lookup(&clerk, &["user", "primaryEmailAddress", "emailAddress"])
        .and_then(|v| v.as_string());

    Identity { signed_in, email }
}

fn clerk() -> Option<JsValue> {
    let window = web_sys::window()?;
    lookup(&window, &["Clerk"])
}

/// Call a zero-argument method on the SDK object, if it has loaded
fn invoke(method: &str) {
    let Some(clerk) = clerk() else {
        log::warn!("Identity SDK not loaded; cannot call {}", method);
        return;
    };
    let Some(function) = lookup(&clerk, &[method]).and_then(|f| f.dyn_into::<Function>().ok()) else {
        log::warn!("Identity SDK has no {} method", method);
        return;
    };
    if let Err(e) = function.call0(&clerk) {
        log::error!("Identity SDK {} failed: {:?}", method, e);
    }
}

/// Show the provider's sign-in dialog
pub fn open_sign_in() {
    invoke("openSignIn");
}

pub fn sign_out() {
    invoke("signOut");
}
