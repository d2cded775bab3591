// Backup I/O - 설정/테마 파일 안전 저장
//
// 저장 시 `<file>.bak`에 먼저 기록한 뒤 원본으로 복사하므로,
// 쓰기 도중 중단되어도 마지막으로 완성된 사본이 남는다.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// 백업 파일 경로 (`<file>.bak`)
pub fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".bak");
    PathBuf::from(name)
}

/// 백업 파일을 거쳐 저장
pub fn write_with_backup(path: &Path, data: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let backup = backup_path(path);
    fs::write(&backup, data)?;
    fs::copy(&backup, path)?;
    Ok(())
}

/// 원본을 읽고, 없거나 읽을 수 없으면 백업 파일을 읽는다
pub fn read_with_backup(path: &Path) -> io::Result<Vec<u8>> {
    match fs::read(path) {
        Ok(data) => Ok(data),
        Err(original_err) => {
            let backup = backup_path(path);
            fs::read(&backup).map_err(|_| original_err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_original_and_backup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("theme.toml");

        write_with_backup(&path, b"hello").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"hello");
        assert_eq!(fs::read(backup_path(&path)).unwrap(), b"hello");
    }

    #[test]
    fn test_read_falls_back_to_backup() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("prefs.toml");
        fs::write(backup_path(&path), b"from backup").unwrap();

        assert_eq!(read_with_backup(&path).unwrap(), b"from backup");
    }

    #[test]
    fn test_read_missing_reports_original_error() {
        let temp = TempDir::new().unwrap();
        let err = read_with_backup(&temp.path().join("none")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_backup_path_appends_suffix() {
        assert_eq!(
            backup_path(Path::new("/a/b/user_theme.toml")),
            PathBuf::from("/a/b/user_theme.toml.bak")
        );
    }
}
