//! Browser probing and the orientation/permission side effects.
//!
//! Everything here touches `window`; the game core only sees the plain data
//! these functions hand back.

use std::cell::Cell;

use js_sys::{Function, Promise, Reflect};
use tiltsketch::{
    DeviceClass, DeviceProfile, NavigatorInfo, OrientationCapability, OrientationSample,
    PermissionResponse, ScreenRotation,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::DeviceOrientationEvent;

thread_local! {
    static ORIENTATION_ATTACHED: Cell<bool> = Cell::new(false);
}

/// Resolve device class, screen rotation and orientation capability once at startup.
pub fn probe() -> DeviceProfile {
    let Some(window) = web_sys::window() else {
        return DeviceProfile::default();
    };

    let navigator = window.navigator();
    let info = NavigatorInfo {
        user_agent: navigator.user_agent().unwrap_or_default(),
        platform: navigator.platform().unwrap_or_default(),
        max_touch_points: navigator.max_touch_points().max(0) as u32,
    };

    DeviceProfile {
        class: DeviceClass::detect(&info),
        rotation: screen_rotation(&window),
        capability: capability(&window),
    }
}

/// `window.orientation`, or `Rot0` where the browser does not report it.
pub fn screen_rotation(window: &web_sys::Window) -> ScreenRotation {
    Reflect::get(window, &"orientation".into())
        .ok()
        .and_then(|value| value.as_f64())
        .and_then(|degrees| ScreenRotation::from_degrees(degrees as i32))
        .unwrap_or_default()
}

fn capability(window: &web_sys::Window) -> OrientationCapability {
    let Some(ctor) = orientation_event_ctor(window) else {
        return OrientationCapability::Unsupported;
    };
    if request_permission_fn(&ctor).is_some() {
        OrientationCapability::ConsentGated
    } else {
        OrientationCapability::Open
    }
}

fn orientation_event_ctor(window: &web_sys::Window) -> Option<JsValue> {
    Reflect::get(window, &"DeviceOrientationEvent".into())
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

fn request_permission_fn(ctor: &JsValue) -> Option<Function> {
    Reflect::get(ctor, &"requestPermission".into())
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            Reflect::get(err, &"message".into())
                .ok()
                .and_then(|message| message.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

/// Call `DeviceOrientationEvent.requestPermission()`.
///
/// The call itself happens synchronously so it stays inside the user gesture
/// that triggered it; only the answer is awaited. Every failure is reported as
/// `PermissionResponse::Failed`.
pub fn request_orientation_permission(on_result: impl FnOnce(PermissionResponse) + 'static) {
    let promise = match start_permission_request() {
        Ok(promise) => promise,
        Err(err) => {
            on_result(PermissionResponse::Failed(describe(&err)));
            return;
        }
    };

    spawn_local(async move {
        let response = match JsFuture::from(promise).await {
            Ok(answer) if answer.as_string().as_deref() == Some("granted") => PermissionResponse::Granted,
            Ok(_) => PermissionResponse::Denied,
            Err(err) => PermissionResponse::Failed(describe(&err)),
        };
        on_result(response);
    });
}

fn start_permission_request() -> Result<Promise, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let ctor = orientation_event_ctor(&window)
        .ok_or_else(|| JsValue::from_str("DeviceOrientationEvent unavailable"))?;
    let request = request_permission_fn(&ctor)
        .ok_or_else(|| JsValue::from_str("requestPermission unavailable"))?;
    request.call0(&ctor)?.dyn_into::<Promise>()
}

/// Listen for `deviceorientation` for the rest of the page's life.
/// Only the first call attaches.
pub fn attach_orientation_listener(mut on_sample: impl FnMut(OrientationSample) + 'static) -> Result<(), JsValue> {
    if ORIENTATION_ATTACHED.with(Cell::get) {
        return Ok(());
    }
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let handler = Closure::<dyn FnMut(DeviceOrientationEvent)>::new(move |event: DeviceOrientationEvent| {
        on_sample(OrientationSample::new(
            event.beta().map(|v| v as f32),
            event.gamma().map(|v| v as f32),
            event.alpha().map(|v| v as f32),
        ));
    });
    window.add_event_listener_with_callback("deviceorientation", handler.as_ref().unchecked_ref())?;
    handler.forget();

    ORIENTATION_ATTACHED.with(|attached| attached.set(true));
    log::info!("deviceorientation listener attached");
    Ok(())
}

/// Report the new screen rotation on every `orientationchange`.
pub fn watch_screen_rotation(mut on_change: impl FnMut(ScreenRotation) + 'static) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    let handler = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        if let Some(window) = web_sys::window() {
            on_change(screen_rotation(&window));
        }
    });
    window.add_event_listener_with_callback("orientationchange", handler.as_ref().unchecked_ref())?;
    handler.forget();
    Ok(())
}
