//! Injected wallet globals, reached through `js_sys::Reflect`.

use async_trait::async_trait;
use js_sys::{Function, Promise, Reflect};
use lib_wallet::injected::{GlobalScope, InjectedObject};
use serde_json::Value;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// `window`, as seen by the wallet adapters.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowScope;

impl GlobalScope for WindowScope {
    type Object = JsInjected;

    fn lookup(&self, name: &str) -> Option<JsInjected> {
        let window = web_sys::window()?;
        let value = Reflect::get(&window, &JsValue::from_str(name)).ok()?;
        (value.is_object() || value.is_function()).then(|| JsInjected(value))
    }
}

/// One extension object such as `window.freighterApi`.
pub struct JsInjected(JsValue);

impl JsInjected {
    fn method(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.0, &JsValue::from_str(name))
            .ok()?
            .dyn_into::<Function>()
            .ok()
    }
}

/// Best-effort message of a thrown JS value.
fn js_error_message(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", err))
}

#[async_trait(?Send)]
impl InjectedObject for JsInjected {
    fn has_method(&self, name: &str) -> bool {
        self.method(name).is_some()
    }

    async fn call(&self, method: &str) -> Result<Value, String> {
        let function = self.method(method).ok_or_else(|| format!("{} is not a function", method))?;
        let mut reply = function.call0(&self.0).map_err(|e| js_error_message(&e))?;

        if let Some(promise) = reply.dyn_ref::<Promise>() {
            reply = JsFuture::from(promise.clone()).await.map_err(|e| js_error_message(&e))?;
        }

        if reply.is_undefined() || reply.is_null() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(reply).map_err(|e| format!("unreadable reply from {}: {}", method, e))
    }
}
