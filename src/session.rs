//! 会话模块
//!
//! 持有 Bearer Token 与缓存的用户资料。存储后端可替换：
//! - `MemoryStorage`: 进程内，测试使用
//! - `FileStorage`: 磁盘上的 JSON 文件，进程重启后仍然有效

use crate::error::{ClientError, ClientResult};
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, RwLock};
use treadx_shared::{AuthResponse, NavSection, UserProfile};

pub const TOKEN_KEY: &str = "authToken";
pub const USER_INFO_KEY: &str = "userInfo";

// =========================================================
// 存储抽象 (Storage Abstraction)
// =========================================================

/// 持久化键值存储
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> ClientResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}

#[derive(Default)]
pub struct MemoryStorage {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: T) -> ClientError {
    ClientError::Storage("storage lock poisoned".to_string())
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        Ok(self.items.read().map_err(poisoned)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        self.items
            .write()
            .map_err(poisoned)?
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        self.items.write().map_err(poisoned)?.remove(key);
        Ok(())
    }
}

/// 整个存储是一个 JSON 对象文件，每次读写都直接落盘
pub struct FileStorage {
    path: PathBuf,
    // 串行化同一进程内的读改写
    lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 无法解析的文件视为空存储，下一次写入会覆盖它
    fn load(&self) -> ClientResult<HashMap<String, String>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        if text.trim().is_empty() {
            return Ok(HashMap::new());
        }
        match serde_json::from_str(&text) {
            Ok(items) => Ok(items),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "discarding corrupt session file"
                );
                Ok(HashMap::new())
            }
        }
    }

    // 先写同目录下的临时文件再替换，中途崩溃不会留下半个文件
    fn save(&self, items: &HashMap<String, String>) -> ClientResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(serde_json::to_string_pretty(items)?.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| ClientError::from(e.error))?;
        Ok(())
    }
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> ClientResult<Option<String>> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> ClientResult<()> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut items = self.load()?;
        items.insert(key.to_string(), value.to_string());
        self.save(&items)
    }

    fn remove(&self, key: &str) -> ClientResult<()> {
        let _guard = self.lock.lock().map_err(poisoned)?;
        let mut items = self.load()?;
        items.remove(key);
        self.save(&items)
    }
}

// =========================================================
// 会话 (Session)
// =========================================================

/// 认证状态
///
/// 由应用根持有并注入到 `ApiClient`，每次发请求时读取 Token。
pub struct Session {
    storage: Box<dyn SessionStorage>,
}

impl Session {
    pub fn new(storage: impl SessionStorage + 'static) -> Self {
        Self {
            storage: Box::new(storage),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::new())
    }

    /// 保存登录结果；Token 为空时不改动已有状态
    pub fn store_login(&self, resp: &AuthResponse) -> ClientResult<bool> {
        if resp.token.is_empty() {
            return Ok(false);
        }
        let profile = serde_json::to_string(&UserProfile::from(resp))?;
        let previous = self.storage.get(USER_INFO_KEY)?;

        // 资料先于 Token 写入；Token 写入失败时恢复原资料
        self.storage.set(USER_INFO_KEY, &profile)?;
        if let Err(e) = self.storage.set(TOKEN_KEY, &resp.token) {
            let restored = match previous {
                Some(raw) => self.storage.set(USER_INFO_KEY, &raw),
                None => self.storage.remove(USER_INFO_KEY),
            };
            if let Err(restore_err) = restored {
                tracing::warn!(error = %restore_err, "failed to restore user profile");
            }
            return Err(e);
        }
        Ok(true)
    }

    /// 清除 Token 与用户资料，不通知服务端
    pub fn clear(&self) -> ClientResult<()> {
        self.storage.remove(TOKEN_KEY)?;
        self.storage.remove(USER_INFO_KEY)
    }

    pub fn token(&self) -> ClientResult<Option<String>> {
        Ok(self.storage.get(TOKEN_KEY)?.filter(|t| !t.is_empty()))
    }

    /// 只检查 Token 是否存在，不校验过期与签名
    pub fn is_authenticated(&self) -> ClientResult<bool> {
        Ok(self.token()?.is_some())
    }

    pub fn current_user(&self) -> ClientResult<Option<UserProfile>> {
        match self.storage.get(USER_INFO_KEY)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// 当前用户可见的导航分区；未登录时为空
    pub fn visible_sections(&self) -> ClientResult<Vec<NavSection>> {
        Ok(self
            .current_user()?
            .map(|u| NavSection::visible_to(u.role))
            .unwrap_or_default())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use treadx_shared::RoleName;

    fn auth(token: &str) -> AuthResponse {
        AuthResponse {
            token: token.to_string(),
            email: "manager@treadx.com".into(),
            first_name: "Sarah".into(),
            last_name: "Manager".into(),
            role: RoleName::SalesManager,
        }
    }

    #[test]
    fn login_then_logout() {
        let session = Session::in_memory();
        assert!(!session.is_authenticated().unwrap());

        assert!(session.store_login(&auth("t-1")).unwrap());
        assert!(session.is_authenticated().unwrap());
        assert_eq!(session.token().unwrap().as_deref(), Some("t-1"));
        let user = session.current_user().unwrap().unwrap();
        assert_eq!(user.first_name, "Sarah");
        assert_eq!(user.role, RoleName::SalesManager);
        assert!(!session.visible_sections().unwrap().contains(&NavSection::Users));

        session.clear().unwrap();
        assert!(!session.is_authenticated().unwrap());
        assert_eq!(session.current_user().unwrap(), None);
        assert!(session.visible_sections().unwrap().is_empty());
    }

    #[test]
    fn empty_token_leaves_state_untouched() {
        let session = Session::in_memory();
        session.store_login(&auth("old")).unwrap();
        assert!(!session.store_login(&auth("")).unwrap());
        assert_eq!(session.token().unwrap().as_deref(), Some("old"));
    }

    #[test]
    fn profile_is_persisted_as_trimmed_json() {
        let session = Session::new(MemoryStorage::new());
        session.store_login(&auth("t")).unwrap();
        let raw = session.storage.get(USER_INFO_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["firstName"], "Sarah");
        assert!(value.get("token").is_none());
    }

    #[test]
    fn file_storage_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let session = Session::new(FileStorage::new(&path));
        session.store_login(&auth("persisted")).unwrap();
        drop(session);

        let reopened = Session::new(FileStorage::new(&path));
        assert_eq!(reopened.token().unwrap().as_deref(), Some("persisted"));
        assert_eq!(
            reopened.current_user().unwrap().unwrap().email,
            "manager@treadx.com"
        );

        reopened.clear().unwrap();
        let again = Session::new(FileStorage::new(&path));
        assert!(!again.is_authenticated().unwrap());
    }

    #[test]
    fn corrupt_file_reads_as_signed_out_and_clear_recovers_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, r#"{"authTok"#).unwrap();

        let session = Session::new(FileStorage::new(&path));
        assert_eq!(session.token().unwrap(), None);
        assert!(!session.is_authenticated().unwrap());

        session.clear().unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let items: HashMap<String, String> = serde_json::from_str(&text).unwrap();
        assert!(items.is_empty());

        session.store_login(&auth("fresh")).unwrap();
        let reopened = Session::new(FileStorage::new(&path));
        assert_eq!(reopened.token().unwrap().as_deref(), Some("fresh"));
    }

    #[test]
    fn save_leaves_no_temporary_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        let session = Session::new(FileStorage::new(&path));
        session.store_login(&auth("t")).unwrap();
        session.clear().unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("session.json")]);
    }

    /// 写入 Token 时失败的存储
    #[derive(Default)]
    struct TokenWriteFails {
        inner: MemoryStorage,
    }

    impl SessionStorage for TokenWriteFails {
        fn get(&self, key: &str) -> ClientResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> ClientResult<()> {
            if key == TOKEN_KEY {
                return Err(ClientError::Storage("disk full".into()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> ClientResult<()> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn failed_token_write_restores_the_profile() {
        let storage = TokenWriteFails::default();
        storage.set(USER_INFO_KEY, r#"{"previous":true}"#).unwrap();
        let session = Session::new(storage);

        let err = session.store_login(&auth("t")).unwrap_err();
        assert!(matches!(err, ClientError::Storage(_)));
        assert!(!session.is_authenticated().unwrap());
        assert_eq!(
            session.storage.get(USER_INFO_KEY).unwrap().as_deref(),
            Some(r#"{"previous":true}"#)
        );

        let fresh = Session::new(TokenWriteFails::default());
        fresh.store_login(&auth("t")).unwrap_err();
        assert_eq!(fresh.storage.get(USER_INFO_KEY).unwrap(), None);
    }
}
