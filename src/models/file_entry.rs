use crate::vfs::VfsPath;
use std::time::SystemTime;

/// 파일 타입
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    /// 디렉토리 (압축 내부 디렉토리 포함)
    Directory,
    /// 일반 파일
    File,
    /// 실행 파일
    Executable,
    /// 탐색 가능한 압축 파일
    Archive,
}

/// 파일 엔트리
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// 파일/디렉토리 이름
    pub name: String,
    /// 가상 경로
    pub path: VfsPath,
    /// 파일 타입 (심볼릭 링크는 대상 기준)
    pub file_type: FileType,
    /// 심볼릭 링크 여부
    pub is_symlink: bool,
    /// 바이트 단위 크기 (디렉토리는 0)
    pub size: u64,
    /// 수정 시간 (압축 엔트리는 없을 수 있음)
    pub modified: Option<SystemTime>,
    /// Unix 모드 비트
    pub mode: Option<u32>,
    /// 숨김 파일 여부
    pub is_hidden: bool,
}

impl FileEntry {
    pub fn new(name: impl Into<String>, path: VfsPath, file_type: FileType, size: u64) -> Self {
        let name = name.into();
        let is_hidden = name.starts_with('.');
        Self {
            name,
            path,
            file_type,
            is_symlink: false,
            size,
            modified: None,
            mode: None,
            is_hidden,
        }
    }

    pub fn with_modified(mut self, modified: Option<SystemTime>) -> Self {
        self.modified = modified;
        self
    }

    pub fn with_mode(mut self, mode: Option<u32>) -> Self {
        self.mode = mode;
        self
    }

    pub fn is_directory(&self) -> bool {
        self.file_type == FileType::Directory
    }

    pub fn is_file(&self) -> bool {
        !self.is_directory()
    }

    /// 패널에서 "열기"로 진입 가능한지 (디렉토리 또는 압축 파일)
    pub fn is_browsable(&self) -> bool {
        matches!(self.file_type, FileType::Directory | FileType::Archive)
    }

    /// 진입 시 이동할 경로
    ///
    /// 압축 파일은 압축 루트로 들어간다.
    pub fn browse_target(&self) -> Option<VfsPath> {
        match (&self.file_type, &self.path) {
            (FileType::Directory, path) => Some(path.clone()),
            (FileType::Archive, VfsPath::Local(path)) => Some(VfsPath::archive_root(path)),
            _ => None,
        }
    }

    /// 확장자 (정렬용, 소문자)
    pub fn extension(&self) -> String {
        match self.name.rfind('.') {
            Some(pos) if pos > 0 => self.name[pos + 1..].to_lowercase(),
            _ => String::new(),
        }
    }
}
