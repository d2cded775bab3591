use std::fmt;
use std::path::{Path, PathBuf};

/// 가상 파일 경로
///
/// 로컬 파일과 압축 파일 내부 엔트리를 하나의 주소 체계로 다룬다.
/// 압축 내부 경로는 `/` 구분자를 쓰며, 빈 문자열은 압축 파일의 루트다.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum VfsPath {
    Local(PathBuf),
    Archive { archive: PathBuf, entry: String },
}

impl VfsPath {
    pub fn local(path: impl Into<PathBuf>) -> Self {
        VfsPath::Local(path.into())
    }

    pub fn archive_root(archive: impl Into<PathBuf>) -> Self {
        VfsPath::Archive {
            archive: archive.into(),
            entry: String::new(),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, VfsPath::Local(_))
    }

    /// 로컬 경로 반환 (압축 내부면 None)
    pub fn as_local(&self) -> Option<&Path> {
        match self {
            VfsPath::Local(path) => Some(path),
            VfsPath::Archive { .. } => None,
        }
    }

    /// 마지막 경로 요소 이름
    pub fn name(&self) -> String {
        match self {
            VfsPath::Local(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.to_string_lossy().to_string()),
            VfsPath::Archive { archive, entry } => {
                if entry.is_empty() {
                    archive
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default()
                } else {
                    entry.rsplit('/').next().unwrap_or(entry).to_string()
                }
            }
        }
    }

    /// 상위 경로
    ///
    /// 압축 루트의 상위는 압축 파일이 들어 있는 로컬 디렉토리다.
    pub fn parent(&self) -> Option<VfsPath> {
        match self {
            VfsPath::Local(path) => path.parent().map(|p| VfsPath::Local(p.to_path_buf())),
            VfsPath::Archive { archive, entry } => {
                if entry.is_empty() {
                    archive.parent().map(|p| VfsPath::Local(p.to_path_buf()))
                } else {
                    let parent_entry = match entry.rfind('/') {
                        Some(pos) => entry[..pos].to_string(),
                        None => String::new(),
                    };
                    Some(VfsPath::Archive {
                        archive: archive.clone(),
                        entry: parent_entry,
                    })
                }
            }
        }
    }

    /// 하위 경로
    pub fn child(&self, name: &str) -> VfsPath {
        match self {
            VfsPath::Local(path) => VfsPath::Local(path.join(name)),
            VfsPath::Archive { archive, entry } => VfsPath::Archive {
                archive: archive.clone(),
                entry: if entry.is_empty() {
                    name.to_string()
                } else {
                    format!("{}/{}", entry, name)
                },
            },
        }
    }

    /// 이 경로가 실제로 놓인 로컬 디렉토리
    ///
    /// 로컬은 자기 자신, 압축 내부는 압축 파일이 있는 디렉토리.
    pub fn host_folder(&self) -> PathBuf {
        match self {
            VfsPath::Local(path) => path.clone(),
            VfsPath::Archive { archive, .. } => archive
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("/")),
        }
    }
}

impl fmt::Display for VfsPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VfsPath::Local(path) => write!(f, "{}", path.display()),
            VfsPath::Archive { archive, entry } => {
                write!(f, "{}::/{}", archive.display(), entry)
            }
        }
    }
}
