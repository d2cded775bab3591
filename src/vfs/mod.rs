// Virtual file system
//
// 로컬 파일과 압축 파일 내부를 같은 FileEntry 목록으로 보여준다.
// 쓰기 작업은 로컬 경로에서만 허용된다.

pub mod archive;
pub mod local;
pub mod path;

pub use path::VfsPath;

use crate::models::file_entry::{FileEntry, FileType};
use crate::utils::error::{MuError, Result};
use archive::{archive_children, is_archive_dir, ArchiveRegistry};
use local::LocalFileSystem;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

/// 파일 시스템 파사드
#[derive(Default)]
pub struct FileSystem {
    local: LocalFileSystem,
    archives: ArchiveRegistry,
}

impl FileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// 폴더 내용 나열
    pub fn list(&self, path: &VfsPath) -> Result<Vec<FileEntry>> {
        match path {
            VfsPath::Local(dir) => {
                let mut entries = self.local.read_directory(dir)?;
                for entry in &mut entries {
                    if entry.file_type != FileType::Directory && self.archives.is_archive_name(&entry.name) {
                        entry.file_type = FileType::Archive;
                    }
                }
                Ok(entries)
            }
            VfsPath::Archive { archive, entry } => {
                let all_entries = self.archives.list_entries(archive)?;
                if !is_archive_dir(&all_entries, entry) {
                    return Err(MuError::NotADirectory {
                        path: PathBuf::from(path.to_string()),
                    });
                }
                Ok(archive_children(&all_entries, entry)
                    .into_iter()
                    .map(|child| {
                        let name = child.path.rsplit('/').next().unwrap_or(&child.path).to_string();
                        let file_type = if child.is_dir {
                            FileType::Directory
                        } else {
                            FileType::File
                        };
                        FileEntry::new(
                            name,
                            VfsPath::Archive {
                                archive: archive.clone(),
                                entry: child.path.clone(),
                            },
                            file_type,
                            child.size,
                        )
                        .with_modified(child.modified)
                        .with_mode(child.mode)
                    })
                    .collect())
            }
        }
    }

    /// 경로가 존재하고 폴더처럼 열 수 있는지
    pub fn exists_as_folder(&self, path: &VfsPath) -> bool {
        match path {
            VfsPath::Local(dir) => dir.is_dir(),
            VfsPath::Archive { archive, entry } => self
                .archives
                .list_entries(archive)
                .map(|entries| is_archive_dir(&entries, entry))
                .unwrap_or(false),
        }
    }

    pub fn is_browsable(&self, entry: &FileEntry) -> bool {
        entry.is_browsable()
    }

    /// 로컬 경로 요구 (압축 내부는 읽기 전용)
    pub fn require_local<'a>(&self, path: &'a VfsPath) -> Result<&'a Path> {
        match path {
            VfsPath::Local(p) => Ok(p),
            VfsPath::Archive { archive, .. } => Err(MuError::ArchiveReadOnly {
                path: archive.clone(),
            }),
        }
    }

    /// 로컬 폴더로 복사, 복사된 바이트 수 반환
    ///
    /// 같은 이름이 이미 있으면 덮어쓰지 않고 실패한다. 복사 도중 실패하면
    /// 만들어진 부분 결과를 지운다.
    pub fn copy_to_local(&self, src: &VfsPath, dest_dir: &Path) -> Result<u64> {
        let dest = dest_dir.join(src.name());
        if dest.exists() {
            return Err(MuError::FileExists { path: dest });
        }

        let result = match src {
            VfsPath::Local(path) => {
                if path.is_dir() {
                    self.local.copy_directory(path, &dest)
                } else {
                    self.local.copy_file(path, &dest)
                }
            }
            VfsPath::Archive { archive, entry } => self.extract_to(archive, entry, &dest),
        };
        if result.is_err() {
            discard_partial(&dest);
        }
        result
    }

    /// 로컬 폴더로 이동 (압축 내부 원본은 거부)
    pub fn move_to_local(&self, src: &VfsPath, dest_dir: &Path) -> Result<u64> {
        let path = self.require_local(src)?;
        self.local.move_path(path, &dest_dir.join(src.name()))
    }

    pub fn rename(&self, src: &VfsPath, new_name: &str) -> Result<VfsPath> {
        let path = self.require_local(src)?;
        let dest = path.with_file_name(new_name);
        self.local.rename_path(path, &dest)?;
        Ok(VfsPath::Local(dest))
    }

    pub fn create_directory(&self, parent: &VfsPath, name: &str) -> Result<VfsPath> {
        let dir = self.require_local(parent)?.join(name);
        self.local.create_directory(&dir)?;
        Ok(VfsPath::Local(dir))
    }

    pub fn trash(&self, paths: &[VfsPath]) -> Result<()> {
        let locals = paths
            .iter()
            .map(|p| self.require_local(p).map(Path::to_path_buf))
            .collect::<Result<Vec<_>>>()?;
        self.local.trash_items(&locals)
    }

    /// 압축 엔트리(파일 또는 디렉토리 하위 전체)를 dest에 추출
    fn extract_to(&self, archive: &Path, entry: &str, dest: &Path) -> Result<u64> {
        let all_entries = self.archives.list_entries(archive)?;
        if is_archive_dir(&all_entries, entry) {
            fs::create_dir_all(dest).map_err(|e| MuError::from_io(dest, e))?;
            return self.archives.extract_subtree(archive, entry, dest);
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|e| MuError::from_io(parent, e))?;
        }
        let mut out = File::create(dest).map_err(|e| MuError::from_io(dest, e))?;
        self.archives.copy_entry(archive, entry, &mut out)
    }
}

/// 실패한 복사의 잔여물 제거 (dest는 복사 전에 없던 경로)
fn discard_partial(dest: &Path) {
    let removed = match fs::symlink_metadata(dest) {
        Ok(meta) if meta.is_dir() => fs::remove_dir_all(dest),
        Ok(_) => fs::remove_file(dest),
        Err(_) => return,
    };
    if let Err(e) = removed {
        tracing::warn!(path = %dest.display(), error = %e, "failed to remove partial copy");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::archive::tests::write_sample_zip;
    use tempfile::TempDir;

    fn sample() -> (TempDir, PathBuf) {
        let temp = TempDir::new().unwrap();
        let zip_path = temp.path().join("bundle.zip");
        write_sample_zip(&zip_path);
        fs::write(temp.path().join("plain.txt"), "plain").unwrap();
        (temp, zip_path)
    }

    #[test]
    fn test_local_listing_marks_archives() {
        let (temp, _) = sample();
        let fs_ = FileSystem::new();
        let entries = fs_.list(&VfsPath::local(temp.path())).unwrap();

        let zip = entries.iter().find(|e| e.name == "bundle.zip").unwrap();
        assert_eq!(zip.file_type, FileType::Archive);
        assert!(fs_.is_browsable(zip));

        let plain = entries.iter().find(|e| e.name == "plain.txt").unwrap();
        assert!(!fs_.is_browsable(plain));
    }

    #[test]
    fn test_archive_listing() {
        let (_temp, zip_path) = sample();
        let fs_ = FileSystem::new();

        let root = fs_.list(&VfsPath::archive_root(&zip_path)).unwrap();
        let names: Vec<&str> = root.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["docs", "src", "top.txt"]);
        assert!(root[1].is_directory());

        let nested = fs_.list(&root[1].path).unwrap();
        assert_eq!(nested[0].name, "main");
        assert_eq!(
            nested[0].path,
            VfsPath::Archive {
                archive: zip_path.clone(),
                entry: "src/main".to_string()
            }
        );

        let file_as_dir = fs_.list(&VfsPath::Archive {
            archive: zip_path,
            entry: "top.txt".to_string(),
        });
        assert!(matches!(file_as_dir, Err(MuError::NotADirectory { .. })));
    }

    #[test]
    fn test_copy_archive_file_and_subtree_to_local() {
        let (temp, zip_path) = sample();
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();
        let fs_ = FileSystem::new();

        let file = VfsPath::Archive {
            archive: zip_path.clone(),
            entry: "top.txt".to_string(),
        };
        assert_eq!(fs_.copy_to_local(&file, &out).unwrap(), 3);
        assert_eq!(fs::read_to_string(out.join("top.txt")).unwrap(), "top");

        let dir = VfsPath::Archive {
            archive: zip_path,
            entry: "src".to_string(),
        };
        fs_.copy_to_local(&dir, &out).unwrap();
        assert_eq!(
            fs::read_to_string(out.join("src").join("main").join("lib.rs")).unwrap(),
            "fn main() {}"
        );

        assert!(matches!(
            fs_.copy_to_local(&file, &out),
            Err(MuError::FileExists { .. })
        ));
    }

    #[test]
    fn test_copy_local_refuses_existing_destination() {
        let (temp, _) = sample();
        let out = temp.path().join("out");
        fs::create_dir_all(out.join("folder")).unwrap();
        fs::write(out.join("plain.txt"), "precious").unwrap();
        fs::create_dir(temp.path().join("folder")).unwrap();
        fs::write(temp.path().join("folder").join("inner.txt"), "new").unwrap();
        let fs_ = FileSystem::new();

        let file = fs_.copy_to_local(&VfsPath::local(temp.path().join("plain.txt")), &out);
        assert!(matches!(file, Err(MuError::FileExists { .. })));
        assert_eq!(fs::read_to_string(out.join("plain.txt")).unwrap(), "precious");

        let dir = fs_.copy_to_local(&VfsPath::local(temp.path().join("folder")), &out);
        assert!(matches!(dir, Err(MuError::FileExists { .. })));
        assert!(!out.join("folder").join("inner.txt").exists());
    }

    #[test]
    fn test_failed_archive_copy_leaves_nothing_behind() {
        let (temp, zip_path) = sample();
        let out = temp.path().join("out");
        fs::create_dir(&out).unwrap();
        let fs_ = FileSystem::new();

        let ghost = VfsPath::Archive {
            archive: zip_path,
            entry: "ghost.txt".to_string(),
        };
        assert!(matches!(
            fs_.copy_to_local(&ghost, &out),
            Err(MuError::ArchiveEntryNotFound { .. })
        ));
        assert!(!out.join("ghost.txt").exists());

        let secret_zip = temp.path().join("secret.zip");
        let file = File::create(&secret_zip).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options =
            zip::write::SimpleFileOptions::default().with_aes_encryption(zip::AesMode::Aes256, "pw");
        writer.start_file("secret.txt", options).unwrap();
        std::io::Write::write_all(&mut writer, b"top-secret").unwrap();
        writer.finish().unwrap();

        let secret = VfsPath::archive_root(&secret_zip).child("secret.txt");
        assert!(matches!(
            fs_.copy_to_local(&secret, &out),
            Err(MuError::ArchivePasswordRequired { .. })
        ));
        assert!(!out.join("secret.txt").exists());

        let whole = VfsPath::archive_root(&secret_zip);
        assert!(fs_.copy_to_local(&whole, &out).is_err());
        assert!(!out.join("secret.zip").exists());
        assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
    }

    #[test]
    fn test_archive_is_read_only() {
        let (_temp, zip_path) = sample();
        let fs_ = FileSystem::new();
        let inside = VfsPath::archive_root(&zip_path);

        assert!(matches!(
            fs_.create_directory(&inside, "new"),
            Err(MuError::ArchiveReadOnly { .. })
        ));
        assert!(matches!(
            fs_.rename(&inside.child("top.txt"), "x"),
            Err(MuError::ArchiveReadOnly { .. })
        ));
    }

    #[test]
    fn test_exists_as_folder() {
        let (temp, zip_path) = sample();
        let fs_ = FileSystem::new();
        assert!(fs_.exists_as_folder(&VfsPath::local(temp.path())));
        assert!(fs_.exists_as_folder(&VfsPath::archive_root(&zip_path).child("docs")));
        assert!(!fs_.exists_as_folder(&VfsPath::archive_root(&zip_path).child("top.txt")));
    }
}
