// Platform image picker and camera launcher
//
// On Android the MainActivity exposes launchImagePicker/launchCamera and stores
// the resulting file path in static fields which are polled over JNI. Other
// platforms report PlatformNotSupported and the UI falls back to a path input.

use crate::error::AppError;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum PickerError {
    PermissionDenied(String),
    Timeout(String),
    Cancelled(String),
    PlatformNotSupported(String),
    Other(String),
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            PickerError::Timeout(msg) => write!(f, "Timeout: {}", msg),
            PickerError::Cancelled(msg) => write!(f, "Cancelled: {}", msg),
            PickerError::PlatformNotSupported(msg) => write!(f, "Platform not supported: {}", msg),
            PickerError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for PickerError {}

impl From<PickerError> for AppError {
    fn from(e: PickerError) -> Self {
        match e {
            PickerError::PermissionDenied(msg) => AppError::PermissionDenied(msg),
            PickerError::Cancelled(msg) | PickerError::Timeout(msg) => AppError::Other(msg),
            PickerError::PlatformNotSupported(msg) => AppError::Other(msg),
            PickerError::Other(msg) => AppError::Other(msg),
        }
    }
}

impl PickerError {
    /// The caller should offer the manual path input instead
    pub fn is_unsupported(&self) -> bool {
        matches!(self, PickerError::PlatformNotSupported(_))
    }
}

#[cfg(target_os = "android")]
mod android {
    use super::PickerError;
    use jni::objects::{JClass, JObject, JString, JValue};
    use jni::JNIEnv;
    use ndk_context::android_context;
    use std::path::PathBuf;

    const MAIN_ACTIVITY_CLASS: &str = "dev/dioxus/main/MainActivity";

    /// 60 seconds at 100ms per poll
    const POLL_ATTEMPTS: u32 = 600;

    fn jni_err(what: &str) -> impl Fn(jni::errors::Error) -> PickerError + '_ {
        move |e| PickerError::Other(format!("{} failed: {}", what, e))
    }

    fn with_env<T>(
        f: impl FnOnce(&mut JNIEnv) -> Result<T, PickerError>,
    ) -> Result<T, PickerError> {
        let vm_ptr = android_context().vm() as *mut *const jni::sys::JNIInvokeInterface_;
        let vm = unsafe { jni::JavaVM::from_raw(vm_ptr) }.map_err(jni_err("JavaVM"))?;
        let mut env = vm.attach_current_thread().map_err(jni_err("JNI attach"))?;
        f(&mut env)
    }

    fn app_class_loader<'a>(env: &mut JNIEnv<'a>) -> Result<JObject<'a>, PickerError> {
        let at_cls = env
            .find_class("android/app/ActivityThread")
            .map_err(jni_err("ActivityThread lookup"))?;
        let thread = env
            .call_static_method(
                &at_cls,
                "currentActivityThread",
                "()Landroid/app/ActivityThread;",
                &[],
            )
            .and_then(|v| v.l())
            .map_err(jni_err("currentActivityThread"))?;
        let app = env
            .call_method(&thread, "getApplication", "()Landroid/app/Application;", &[])
            .and_then(|v| v.l())
            .map_err(jni_err("getApplication"))?;
        if app.is_null() {
            return Err(PickerError::Other("Application not initialized".to_string()));
        }
        env.call_method(&app, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])
            .and_then(|v| v.l())
            .map_err(jni_err("getClassLoader"))
    }

    fn activity<'a>(env: &mut JNIEnv<'a>) -> Result<(JObject<'a>, JClass<'a>), PickerError> {
        let loader = app_class_loader(env)?;
        let name: JString = env
            .new_string(MAIN_ACTIVITY_CLASS.replace('/', "."))
            .map_err(jni_err("new_string"))?;
        let cls = env
            .call_method(
                &loader,
                "loadClass",
                "(Ljava/lang/String;)Ljava/lang/Class;",
                &[JValue::Object(&JObject::from(name))],
            )
            .and_then(|v| v.l())
            .map_err(jni_err("loadClass"))?;
        let cls = JClass::from(cls);

        let signature = format!("()L{};", MAIN_ACTIVITY_CLASS);
        let instance = env
            .call_static_method(&cls, "getInstance", &signature, &[])
            .and_then(|v| v.l())
            .map_err(jni_err("getInstance"))?;
        if instance.is_null() {
            return Err(PickerError::Other(
                "MainActivity instance is null - Activity not initialized?".to_string(),
            ));
        }
        Ok((instance, cls))
    }

    fn static_string(env: &mut JNIEnv, cls: &JClass, method: &str) -> Option<String> {
        let obj = env
            .call_static_method(cls, method, "()Ljava/lang/String;", &[])
            .ok()?
            .l()
            .ok()?;
        if obj.is_null() {
            return None;
        }
        env.get_string((&obj).into()).ok().map(Into::into)
    }

    /// Calls `launcher` on the activity and waits for a photo path or an error
    pub fn launch_and_wait(launcher: &str, timeout_msg: &str) -> Result<PathBuf, PickerError> {
        with_env(|env| {
            let (activity, cls) = activity(env)?;
            env.call_static_method(&cls, "clearLastError", "()V", &[])
                .map_err(jni_err("clearLastError"))?;
            env.call_method(&activity, launcher, "()V", &[])
                .map_err(jni_err(launcher))?;

            for _ in 0..POLL_ATTEMPTS {
                std::thread::sleep(std::time::Duration::from_millis(100));

                if let Some(path) = static_string(env, &cls, "getLastPhotoPath") {
                    return Ok(PathBuf::from(path));
                }
                if let Some(err) = static_string(env, &cls, "getLastError") {
                    if err.to_lowercase().contains("cancel") {
                        return Err(PickerError::Cancelled(err));
                    }
                    return Err(PickerError::PermissionDenied(err));
                }
            }

            Err(PickerError::Timeout(timeout_msg.to_string()))
        })
    }

    pub fn has_camera_permission() -> Result<bool, PickerError> {
        with_env(|env| {
            let (activity, _cls) = activity(env)?;
            env.call_method(&activity, "hasCameraPermission", "()Z", &[])
                .and_then(|v| v.z())
                .map_err(jni_err("hasCameraPermission"))
        })
    }
}

/// Pick a single image from the gallery. Blocks up to 60 seconds.
#[cfg(target_os = "android")]
pub fn pick_image() -> Result<PathBuf, PickerError> {
    android::launch_and_wait("launchImagePicker", "Image picker timeout - no selection made")
}

/// Take a photo with the system camera. Blocks up to 60 seconds.
#[cfg(target_os = "android")]
pub fn capture_photo() -> Result<PathBuf, PickerError> {
    android::launch_and_wait("launchCamera", "Camera timeout - no photo taken")
}

#[cfg(target_os = "android")]
pub fn has_camera_permission() -> Result<bool, PickerError> {
    android::has_camera_permission()
}

#[cfg(not(target_os = "android"))]
pub fn pick_image() -> Result<PathBuf, PickerError> {
    Err(PickerError::PlatformNotSupported(
        "Image picker not available on this platform".to_string(),
    ))
}

#[cfg(not(target_os = "android"))]
pub fn capture_photo() -> Result<PathBuf, PickerError> {
    Err(PickerError::PlatformNotSupported(
        "Camera not available on this platform".to_string(),
    ))
}

#[cfg(not(target_os = "android"))]
pub fn has_camera_permission() -> Result<bool, PickerError> {
    Err(PickerError::PlatformNotSupported(
        "Camera not available on this platform".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_os = "android"))]
    #[test]
    fn test_desktop_reports_unsupported() {
        assert!(pick_image().unwrap_err().is_unsupported());
        assert!(capture_photo().unwrap_err().is_unsupported());
        assert!(has_camera_permission().unwrap_err().is_unsupported());
    }

    #[test]
    fn test_permission_error_maps_to_app_error() {
        let err: AppError = PickerError::PermissionDenied("camera".to_string()).into();
        assert!(matches!(err, AppError::PermissionDenied(_)));
    }
}
