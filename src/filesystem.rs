use std::fs;
use std::io::Result;
use std::path::{Path, PathBuf};

#[cfg(target_os = "android")]
fn android_dir(method: &str, arg_type: Option<&str>) -> Option<PathBuf> {
    use jni::{
        objects::{JObject, JString, JValue},
        JavaVM,
    };
    unsafe {
        let ctx = ndk_context::android_context();
        let vm = JavaVM::from_raw(ctx.vm().cast()).ok()?;
        let mut env = vm.attach_current_thread().ok()?;
        let activity = JObject::from_raw(ctx.context().cast());
        let dir = match arg_type {
            None => env
                .call_method(&activity, method, "()Ljava/io/File;", &[])
                .ok()?
                .l()
                .ok()?,
            Some(kind) => {
                let kind = env.new_string(kind).ok()?;
                env.call_method(
                    &activity,
                    method,
                    "(Ljava/lang/String;)Ljava/io/File;",
                    &[JValue::Object(&JObject::from(kind))],
                )
                .ok()?
                .l()
                .ok()?
            }
        };
        if dir.is_null() {
            return None;
        }
        let abs_path_obj = env
            .call_method(dir, "getAbsolutePath", "()Ljava/lang/String;", &[])
            .ok()?
            .l()
            .ok()?;
        let abs_path_jstring: JString = JString::from(abs_path_obj);
        let abs_path: String = env.get_string(&abs_path_jstring).ok()?.into();
        Some(PathBuf::from(abs_path))
    }
}

/// Get the app data directory for the current platform
pub fn get_app_data_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        if let Some(dir) = android_dir("getFilesDir", None) {
            return dir;
        }
        for d in [
            "/data/user/0/dev.virtualvogue.app/files",
            "/data/data/dev.virtualvogue.app/files",
        ] {
            let p = PathBuf::from(d);
            if p.exists() {
                return p;
            }
        }
        PathBuf::from("./data")
    }

    #[cfg(not(target_os = "android"))]
    {
        PathBuf::from("./data")
    }
}

/// Where downloaded try-on results end up
pub fn get_downloads_dir() -> PathBuf {
    #[cfg(target_os = "android")]
    {
        android_dir("getExternalFilesDir", Some("Download"))
            .unwrap_or_else(|| get_app_data_dir().join("downloads"))
    }

    #[cfg(not(target_os = "android"))]
    {
        get_app_data_dir().join("downloads")
    }
}

/// Resolves `path` against the app data directory unless it is absolute
pub fn resolve_data_path(path: &str) -> PathBuf {
    resolve_in(&get_app_data_dir(), path)
}

pub fn resolve_in(base: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base.join(p)
    }
}

/// Write a file into app storage, creating the directory if needed
pub fn write_data_file(filename: &str, content: &[u8]) -> Result<PathBuf> {
    let dir = get_app_data_dir();
    fs::create_dir_all(&dir)?;

    let filepath = dir.join(filename);
    fs::write(&filepath, content)?;

    Ok(filepath)
}
