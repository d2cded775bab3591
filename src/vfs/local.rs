use crate::models::file_entry::{FileEntry, FileType};
use crate::utils::error::{MuError, Result};
use crate::vfs::VfsPath;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};

/// 로컬 파일 시스템
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFileSystem;

impl LocalFileSystem {
    /// 디렉토리 읽기
    ///
    /// 읽을 수 없는 개별 엔트리는 건너뛴다.
    pub fn read_directory(&self, path: &Path) -> Result<Vec<FileEntry>> {
        if !path.exists() {
            return Err(MuError::PathNotFound {
                path: path.to_path_buf(),
            });
        }
        if !path.is_dir() {
            return Err(MuError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        let read_dir = fs::read_dir(path).map_err(|e| MuError::from_io(path, e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let Ok(entry) = entry else { continue };
            let entry_path = entry.path();
            let Ok(link_metadata) = fs::symlink_metadata(&entry_path) else {
                continue;
            };

            let is_symlink = link_metadata.file_type().is_symlink();
            // 심볼릭 링크는 대상 메타데이터 우선 (깨진 링크는 링크 자체)
            let metadata = if is_symlink {
                fs::metadata(&entry_path).unwrap_or(link_metadata)
            } else {
                link_metadata
            };

            let name = entry.file_name().to_string_lossy().to_string();
            let file_type = Self::file_type(&metadata);
            let size = if file_type == FileType::Directory {
                0
            } else {
                metadata.len()
            };

            let mut file_entry = FileEntry::new(name, VfsPath::Local(entry_path.clone()), file_type, size)
                .with_modified(metadata.modified().ok())
                .with_mode(Self::mode(&metadata));
            file_entry.is_symlink = is_symlink;
            file_entry.is_hidden = self.is_hidden(&entry_path);
            entries.push(file_entry);
        }

        Ok(entries)
    }

    fn file_type(metadata: &Metadata) -> FileType {
        if metadata.is_dir() {
            return FileType::Directory;
        }
        if let Some(mode) = Self::mode(metadata) {
            if mode & 0o111 != 0 {
                return FileType::Executable;
            }
        }
        FileType::File
    }

    #[cfg(unix)]
    fn mode(metadata: &Metadata) -> Option<u32> {
        use std::os::unix::fs::PermissionsExt;
        Some(metadata.permissions().mode())
    }

    #[cfg(not(unix))]
    fn mode(_metadata: &Metadata) -> Option<u32> {
        None
    }

    /// 숨김 파일 여부 판단
    pub fn is_hidden(&self, path: &Path) -> bool {
        let file_name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };

        #[cfg(windows)]
        {
            use std::os::windows::fs::MetadataExt;
            if let Ok(metadata) = path.metadata() {
                const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;
                if (metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN) != 0 {
                    return true;
                }
            }
        }

        file_name.starts_with('.')
    }

    /// 파일 복사, 복사된 바이트 수 반환
    pub fn copy_file(&self, src: &Path, dest: &Path) -> Result<u64> {
        if src == dest {
            return Err(MuError::SameSourceAndDest {
                path: src.to_path_buf(),
            });
        }
        if !src.exists() {
            return Err(MuError::PathNotFound {
                path: src.to_path_buf(),
            });
        }

        fs::copy(src, dest).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                MuError::PermissionDenied {
                    path: dest.to_path_buf(),
                }
            } else {
                MuError::CopyFailed {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })
    }

    /// 디렉토리 재귀 복사, 복사된 총 바이트 수 반환
    pub fn copy_directory(&self, src: &Path, dest: &Path) -> Result<u64> {
        if src == dest {
            return Err(MuError::SameSourceAndDest {
                path: src.to_path_buf(),
            });
        }
        if !src.is_dir() {
            return Err(MuError::NotADirectory {
                path: src.to_path_buf(),
            });
        }
        if dest.starts_with(src) {
            return Err(MuError::CopyFailed {
                src: src.to_path_buf(),
                dest: dest.to_path_buf(),
                reason: "Cannot copy a directory into itself".to_string(),
            });
        }

        fs::create_dir_all(dest).map_err(|e| MuError::from_io(dest, e))?;

        let mut total_bytes = 0u64;
        for entry in fs::read_dir(src).map_err(|e| MuError::from_io(src, e))? {
            let entry = entry?;
            let entry_path = entry.path();
            let dest_path = dest.join(entry.file_name());
            if entry_path.is_dir() {
                total_bytes += self.copy_directory(&entry_path, &dest_path)?;
            } else {
                total_bytes += self.copy_file(&entry_path, &dest_path)?;
            }
        }
        Ok(total_bytes)
    }

    /// 파일/디렉토리 이동
    ///
    /// rename을 먼저 시도하고, 실패하면(다른 파일시스템) 복사 후 삭제한다.
    pub fn move_path(&self, src: &Path, dest: &Path) -> Result<u64> {
        if src == dest {
            return Err(MuError::SameSourceAndDest {
                path: src.to_path_buf(),
            });
        }
        if !src.exists() {
            return Err(MuError::PathNotFound {
                path: src.to_path_buf(),
            });
        }
        if dest.exists() {
            return Err(MuError::FileExists {
                path: dest.to_path_buf(),
            });
        }

        let (total_bytes, _) = self.calculate_total_size(&[src.to_path_buf()])?;
        if fs::rename(src, dest).is_ok() {
            return Ok(total_bytes);
        }

        if src.is_dir() {
            self.copy_directory(src, dest)?;
        } else {
            self.copy_file(src, dest)?;
        }
        self.delete_path(src).map_err(|e| MuError::MoveFailed {
            src: src.to_path_buf(),
            dest: dest.to_path_buf(),
            reason: format!("Failed to remove source after copy: {}", e),
        })?;
        Ok(total_bytes)
    }

    /// 경로 목록의 총 크기와 파일 수 계산
    ///
    /// 반환값: (총 바이트, 총 파일 수)
    pub fn calculate_total_size(&self, paths: &[PathBuf]) -> Result<(u64, usize)> {
        let mut total_bytes = 0u64;
        let mut total_files = 0usize;

        for path in paths {
            let metadata = fs::symlink_metadata(path).map_err(|e| MuError::from_io(path, e))?;
            if metadata.is_dir() {
                let children: Vec<PathBuf> = fs::read_dir(path)
                    .map_err(|e| MuError::from_io(path, e))?
                    .filter_map(|entry| entry.ok().map(|e| e.path()))
                    .collect();
                let (bytes, files) = self.calculate_total_size(&children)?;
                total_bytes += bytes;
                total_files += files;
            } else {
                total_bytes += metadata.len();
                total_files += 1;
            }
        }

        Ok((total_bytes, total_files))
    }

    /// 영구 삭제 (파일 또는 디렉토리 재귀)
    pub fn delete_path(&self, path: &Path) -> Result<()> {
        let metadata = fs::symlink_metadata(path).map_err(|e| MuError::from_io(path, e))?;
        let result = if metadata.is_dir() {
            fs::remove_dir_all(path)
        } else {
            fs::remove_file(path)
        };
        result.map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                MuError::PermissionDenied {
                    path: path.to_path_buf(),
                }
            } else {
                MuError::DeleteFailed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })
    }

    /// 휴지통으로 이동 (trash crate 래퍼)
    pub fn trash_items(&self, paths: &[PathBuf]) -> Result<()> {
        trash::delete_all(paths).map_err(|e| MuError::DeleteFailed {
            path: paths.first().cloned().unwrap_or_default(),
            reason: e.to_string(),
        })
    }

    /// 새 디렉토리 생성
    pub fn create_directory(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(MuError::FileExists {
                path: path.to_path_buf(),
            });
        }
        fs::create_dir(path).map_err(|e| MuError::from_io(path, e))
    }

    /// 파일/디렉토리 이름 변경
    pub fn rename_path(&self, src: &Path, dest: &Path) -> Result<()> {
        if !src.exists() {
            return Err(MuError::PathNotFound {
                path: src.to_path_buf(),
            });
        }
        if dest.exists() {
            return Err(MuError::FileExists {
                path: dest.to_path_buf(),
            });
        }

        fs::rename(src, dest).map_err(|e| {
            if e.kind() == std::io::ErrorKind::PermissionDenied {
                MuError::PermissionDenied {
                    path: src.to_path_buf(),
                }
            } else {
                MuError::RenameFailed {
                    src: src.to_path_buf(),
                    dest: dest.to_path_buf(),
                    reason: e.to_string(),
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), "a").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();

        let fs_ = LocalFileSystem;
        let mut entries = fs_.read_directory(temp.path()).unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].name, "a.txt");
        assert_eq!(entries[0].size, 1);
        assert!(entries[0].modified.is_some());
        assert!(entries[1].is_directory());
        assert_eq!(entries[1].size, 0);
    }

    #[test]
    fn test_read_nonexistent_directory() {
        let result = LocalFileSystem.read_directory(Path::new("/nonexistent/path/12345"));
        assert!(matches!(result, Err(MuError::PathNotFound { .. })));
    }

    #[test]
    fn test_read_file_as_directory_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("f");
        fs::write(&file, "x").unwrap();
        let result = LocalFileSystem.read_directory(&file);
        assert!(matches!(result, Err(MuError::NotADirectory { .. })));
    }

    #[test]
    fn test_is_hidden() {
        let fs_ = LocalFileSystem;
        assert!(fs_.is_hidden(Path::new("/tmp/.hidden")));
        assert!(!fs_.is_hidden(Path::new("/tmp/visible")));
    }

    #[cfg(unix)]
    #[test]
    fn test_file_type_detection() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().unwrap();
        let script = temp.path().join("run.sh");
        fs::write(&script, "#!/bin/sh").unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();

        let entries = LocalFileSystem.read_directory(temp.path()).unwrap();
        assert_eq!(entries[0].file_type, FileType::Executable);
        assert_eq!(entries[0].mode.map(|m| m & 0o777), Some(0o755));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_to_directory_is_directory() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("target")).unwrap();
        std::os::unix::fs::symlink(temp.path().join("target"), temp.path().join("link")).unwrap();

        let entries = LocalFileSystem.read_directory(temp.path()).unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert!(link.is_symlink);
        assert!(link.is_directory());
    }

    #[test]
    fn test_copy_directory_recursive() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(src.join("inner")).unwrap();
        fs::write(src.join("one.txt"), "12345").unwrap();
        fs::write(src.join("inner").join("two.txt"), "678").unwrap();

        let dest = temp.path().join("dest");
        let copied = LocalFileSystem.copy_directory(&src, &dest).unwrap();

        assert_eq!(copied, 8);
        assert_eq!(fs::read_to_string(dest.join("inner").join("two.txt")).unwrap(), "678");
    }

    #[test]
    fn test_copy_directory_into_itself_fails() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("src");
        fs::create_dir_all(&src).unwrap();
        let result = LocalFileSystem.copy_directory(&src, &src.join("nested"));
        assert!(matches!(result, Err(MuError::CopyFailed { .. })));
    }

    #[test]
    fn test_copy_file_same_path_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("x");
        fs::write(&file, "x").unwrap();
        let result = LocalFileSystem.copy_file(&file, &file);
        assert!(matches!(result, Err(MuError::SameSourceAndDest { .. })));
    }

    #[test]
    fn test_move_path_refuses_existing_destination() {
        let temp = TempDir::new().unwrap();
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        fs::write(&a, "a").unwrap();
        fs::write(&b, "b").unwrap();

        let fs_ = LocalFileSystem;
        assert!(matches!(fs_.move_path(&a, &b), Err(MuError::FileExists { .. })));

        let c = temp.path().join("c");
        assert_eq!(fs_.move_path(&a, &c).unwrap(), 1);
        assert!(!a.exists());
        assert!(c.exists());
    }

    #[test]
    fn test_create_directory() {
        let temp = TempDir::new().unwrap();
        let new_dir = temp.path().join("new_folder");
        let fs_ = LocalFileSystem;

        assert!(fs_.create_directory(&new_dir).is_ok());
        assert!(new_dir.is_dir());
        assert!(matches!(fs_.create_directory(&new_dir), Err(MuError::FileExists { .. })));
    }

    #[test]
    fn test_rename_path() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("old.txt");
        let dest = temp.path().join("new.txt");
        fs::write(&src, "content").unwrap();

        let fs_ = LocalFileSystem;
        fs_.rename_path(&src, &dest).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "content");

        let missing = fs_.rename_path(&src, &temp.path().join("z"));
        assert!(matches!(missing, Err(MuError::PathNotFound { .. })));
    }

    #[test]
    fn test_delete_path_and_total_size() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("d");
        fs::create_dir_all(dir.join("e")).unwrap();
        fs::write(dir.join("e").join("f"), "1234").unwrap();
        fs::write(dir.join("g"), "12").unwrap();

        let fs_ = LocalFileSystem;
        assert_eq!(fs_.calculate_total_size(&[dir.clone()]).unwrap(), (6, 2));

        fs_.delete_path(&dir).unwrap();
        assert!(!dir.exists());
    }
}
