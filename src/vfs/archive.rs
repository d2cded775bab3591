// Archive format providers
//
// 압축 파일은 읽기 전용으로 탐색한다. 각 포맷은 ArchiveFormatProvider로
// 등록되며, 파일 이름(확장자)으로 선택된다.

use crate::utils::error::{MuError, Result};
use flate2::read::GzDecoder;
use sevenz_rust2::Error as SevenZError;
use sevenz_rust2::Password as SevenZPassword;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tar::Archive as TarArchive;
use zip::result::ZipError;
use zip::ZipArchive;
use zstd::stream::read::Decoder as ZstdDecoder;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Zip,
    Jar,
    War,
    Tar,
    TarGz,
    TarZst,
    SevenZ,
    Deb,
    Ar,
}

impl ArchiveFormat {
    pub fn display_name(&self) -> &'static str {
        match self {
            ArchiveFormat::Zip => "zip",
            ArchiveFormat::Jar => "jar",
            ArchiveFormat::War => "war",
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::TarZst => "tar.zst",
            ArchiveFormat::SevenZ => "7z",
            ArchiveFormat::Deb => "deb",
            ArchiveFormat::Ar => "ar",
        }
    }
}

/// 압축 파일 내부 엔트리 (정규화된 경로)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub path: String,
    pub size: u64,
    pub is_dir: bool,
    pub modified: Option<SystemTime>,
    pub mode: Option<u32>,
}

impl ArchiveEntry {
    fn new(path: &str, size: u64, is_dir: bool) -> Self {
        Self {
            path: normalize_entry_path(path),
            size,
            is_dir,
            modified: None,
            mode: None,
        }
    }
}

/// 압축 포맷 제공자
pub trait ArchiveFormatProvider: Send + Sync {
    fn format(&self) -> ArchiveFormat;

    /// 소문자 확장자 목록 (점 제외, `tar.gz`처럼 복합 확장자 허용)
    fn extensions(&self) -> &'static [&'static str];

    /// 파일 이름에 매칭되는 가장 긴 확장자 길이
    fn matched_extension_len(&self, file_name: &str) -> Option<usize> {
        let lower = file_name.to_lowercase();
        self.extensions()
            .iter()
            .filter(|ext| {
                lower.len() > ext.len() + 1
                    && lower.ends_with(*ext)
                    && lower.as_bytes()[lower.len() - ext.len() - 1] == b'.'
            })
            .map(|ext| ext.len())
            .max()
    }

    fn matches(&self, file_name: &str) -> bool {
        self.matched_extension_len(file_name).is_some()
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<ArchiveEntry>>;

    /// 엔트리 내용을 writer로 복사, 복사된 바이트 수 반환
    fn copy_entry(&self, path: &Path, entry: &str, out: &mut dyn Write) -> Result<u64>;

    /// 디렉토리 엔트리(`""`는 루트) 아래를 한 번의 순회로 `dest`에 추출
    fn extract_subtree(&self, path: &Path, entry: &str, dest: &Path) -> Result<u64>;
}

/// 경로 정규화: `\` → `/`, 앞뒤 `/`와 `./` 제거
pub fn normalize_entry_path(name: &str) -> String {
    name.replace('\\', "/")
        .split('/')
        .filter(|part| !part.is_empty() && *part != ".")
        .collect::<Vec<_>>()
        .join("/")
}

/// 추출 대상 경로 계산 (`..`/절대 경로는 거부)
pub fn sanitize_extract_path(dest_root: &Path, raw_path: &str) -> Option<PathBuf> {
    let mut clean = PathBuf::new();
    for comp in Path::new(raw_path).components() {
        match comp {
            Component::Normal(v) => clean.push(v),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    let out = dest_root.join(clean);
    if out.starts_with(dest_root) {
        Some(out)
    } else {
        None
    }
}

/// 하위 트리 엔트리의 추출 위치 (범위 밖이거나 안전하지 않으면 None)
fn subtree_target(dest_root: &Path, entry: &str, name: &str) -> Option<PathBuf> {
    let entry = normalize_entry_path(entry);
    let name = normalize_entry_path(name);
    let relative = if entry.is_empty() {
        name.as_str()
    } else {
        name.strip_prefix(&entry)?.strip_prefix('/')?
    };
    if relative.is_empty() {
        return None;
    }
    let target = sanitize_extract_path(dest_root, relative);
    if target.is_none() {
        tracing::warn!(entry = %name, "blocked unsafe archive path");
    }
    target
}

fn extract_file(archive: &Path, entry: &str, target: &Path, reader: &mut dyn Read) -> Result<u64> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|e| MuError::from_io(parent, e))?;
    }
    let mut out = File::create(target).map_err(|e| MuError::from_io(target, e))?;
    io::copy(reader, &mut out).map_err(|e| read_failed(archive, entry, e))
}

fn extract_dir(target: &Path) -> Result<u64> {
    fs::create_dir_all(target).map_err(|e| MuError::from_io(target, e))?;
    Ok(0)
}

fn open_archive(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| MuError::from_io(path, e))
}

fn unix_time(secs: u64) -> Option<SystemTime> {
    if secs == 0 {
        None
    } else {
        UNIX_EPOCH.checked_add(Duration::from_secs(secs))
    }
}

fn entry_not_found(path: &Path, entry: &str) -> MuError {
    MuError::ArchiveEntryNotFound {
        path: path.to_path_buf(),
        entry: entry.to_string(),
    }
}

fn read_failed(path: &Path, entry: &str, reason: impl ToString) -> MuError {
    MuError::ArchiveReadFailed {
        path: path.to_path_buf(),
        entry: entry.to_string(),
        reason: reason.to_string(),
    }
}

// ZIP ---------------------------------------------------------------------

/// zip, jar, war
pub struct ZipProvider {
    format: ArchiveFormat,
}

impl ZipProvider {
    pub fn new(format: ArchiveFormat) -> Self {
        Self { format }
    }

    fn map_error(path: &Path, error: ZipError) -> MuError {
        match error {
            ZipError::UnsupportedArchive(detail) if detail == ZipError::PASSWORD_REQUIRED => {
                MuError::ArchivePasswordRequired {
                    path: path.to_path_buf(),
                }
            }
            ZipError::Io(e) => MuError::from_io(path, e),
            other => MuError::ArchiveListFailed {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }

    fn map_read_error(path: &Path, entry: &str, error: ZipError) -> MuError {
        match error {
            ZipError::UnsupportedArchive(detail) if detail == ZipError::PASSWORD_REQUIRED => {
                MuError::ArchivePasswordRequired {
                    path: path.to_path_buf(),
                }
            }
            other => read_failed(path, entry, other),
        }
    }

    fn zip_time(dt: zip::DateTime) -> Option<SystemTime> {
        let naive = chrono::NaiveDate::from_ymd_opt(dt.year() as i32, dt.month() as u32, dt.day() as u32)?
            .and_hms_opt(dt.hour() as u32, dt.minute() as u32, dt.second() as u32)?;
        Some(SystemTime::from(naive.and_utc()))
    }
}

impl ArchiveFormatProvider for ZipProvider {
    fn format(&self) -> ArchiveFormat {
        self.format
    }

    fn extensions(&self) -> &'static [&'static str] {
        match self.format {
            ArchiveFormat::Jar => &["jar"],
            ArchiveFormat::War => &["war"],
            _ => &["zip"],
        }
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<ArchiveEntry>> {
        let file = open_archive(path)?;
        let mut archive = ZipArchive::new(file).map_err(|e| Self::map_error(path, e))?;

        let mut entries = Vec::with_capacity(archive.len());
        for i in 0..archive.len() {
            // 메타데이터만 읽으므로 암호화 엔트리도 나열 가능
            let entry = archive
                .by_index_raw(i)
                .map_err(|e| Self::map_error(path, e))?;
            let mut item = ArchiveEntry::new(entry.name(), entry.size(), entry.is_dir());
            item.modified = entry.last_modified().and_then(Self::zip_time);
            item.mode = entry.unix_mode();
            entries.push(item);
        }
        Ok(entries)
    }

    fn copy_entry(&self, path: &Path, entry: &str, out: &mut dyn Write) -> Result<u64> {
        let file = open_archive(path)?;
        let mut archive = ZipArchive::new(file).map_err(|e| Self::map_error(path, e))?;

        let wanted = normalize_entry_path(entry);
        let index = (0..archive.len())
            .find(|&i| {
                archive
                    .name_for_index(i)
                    .is_some_and(|name| normalize_entry_path(name) == wanted)
            })
            .ok_or_else(|| entry_not_found(path, entry))?;

        let mut zip_file = archive
            .by_index(index)
            .map_err(|e| Self::map_read_error(path, entry, e))?;
        io::copy(&mut zip_file, out).map_err(|e| read_failed(path, entry, e))
    }

    fn extract_subtree(&self, path: &Path, entry: &str, dest: &Path) -> Result<u64> {
        let file = open_archive(path)?;
        let mut archive = ZipArchive::new(file).map_err(|e| Self::map_error(path, e))?;

        let mut total = 0u64;
        for i in 0..archive.len() {
            let Some(target) = archive
                .name_for_index(i)
                .and_then(|name| subtree_target(dest, entry, name))
            else {
                continue;
            };
            let mut zip_file = archive
                .by_index(i)
                .map_err(|e| Self::map_read_error(path, entry, e))?;
            if zip_file.is_dir() {
                extract_dir(&target)?;
            } else {
                let name = zip_file.name().to_string();
                total += extract_file(path, &name, &target, &mut zip_file)?;
            }
        }
        Ok(total)
    }
}

// TAR ---------------------------------------------------------------------

/// tar, tar.gz/tgz, tar.zst/tzst
pub struct TarProvider {
    format: ArchiveFormat,
}

impl TarProvider {
    pub fn new(format: ArchiveFormat) -> Self {
        Self { format }
    }

    fn open_reader(&self, path: &Path) -> Result<Box<dyn Read>> {
        let file = open_archive(path)?;
        Ok(match self.format {
            ArchiveFormat::TarGz => Box::new(GzDecoder::new(file)),
            ArchiveFormat::TarZst => {
                Box::new(ZstdDecoder::new(file).map_err(|e| MuError::from_io(path, e))?)
            }
            _ => Box::new(file),
        })
    }

    fn list_failed(path: &Path, e: io::Error) -> MuError {
        MuError::ArchiveListFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

impl ArchiveFormatProvider for TarProvider {
    fn format(&self) -> ArchiveFormat {
        self.format
    }

    fn extensions(&self) -> &'static [&'static str] {
        match self.format {
            ArchiveFormat::TarGz => &["tar.gz", "tgz"],
            ArchiveFormat::TarZst => &["tar.zst", "tzst"],
            _ => &["tar"],
        }
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<ArchiveEntry>> {
        let mut archive = TarArchive::new(self.open_reader(path)?);
        let mut entries = Vec::new();
        for entry_result in archive.entries().map_err(|e| Self::list_failed(path, e))? {
            let entry = entry_result.map_err(|e| Self::list_failed(path, e))?;
            let entry_path = entry.path().map_err(|e| Self::list_failed(path, e))?;
            let header = entry.header();
            let mut item = ArchiveEntry::new(
                &entry_path.to_string_lossy(),
                entry.size(),
                header.entry_type().is_dir(),
            );
            item.modified = header.mtime().ok().and_then(unix_time);
            item.mode = header.mode().ok();
            entries.push(item);
        }
        Ok(entries)
    }

    fn copy_entry(&self, path: &Path, entry: &str, out: &mut dyn Write) -> Result<u64> {
        let wanted = normalize_entry_path(entry);
        let mut archive = TarArchive::new(self.open_reader(path)?);
        for entry_result in archive.entries().map_err(|e| read_failed(path, entry, e))? {
            let mut tar_entry = entry_result.map_err(|e| read_failed(path, entry, e))?;
            let matches = tar_entry
                .path()
                .map(|p| normalize_entry_path(&p.to_string_lossy()) == wanted)
                .unwrap_or(false);
            if matches && !tar_entry.header().entry_type().is_dir() {
                return io::copy(&mut tar_entry, out).map_err(|e| read_failed(path, entry, e));
            }
        }
        Err(entry_not_found(path, entry))
    }

    fn extract_subtree(&self, path: &Path, entry: &str, dest: &Path) -> Result<u64> {
        let mut archive = TarArchive::new(self.open_reader(path)?);
        let mut total = 0u64;
        for entry_result in archive.entries().map_err(|e| read_failed(path, entry, e))? {
            let mut tar_entry = entry_result.map_err(|e| read_failed(path, entry, e))?;
            let Ok(name) = tar_entry.path().map(|p| p.to_string_lossy().to_string()) else {
                continue;
            };
            let Some(target) = subtree_target(dest, entry, &name) else {
                continue;
            };
            // 링크와 특수 파일은 건너뛴다
            let kind = tar_entry.header().entry_type();
            if kind.is_dir() {
                extract_dir(&target)?;
            } else if kind.is_file() {
                total += extract_file(path, &name, &target, &mut tar_entry)?;
            }
        }
        Ok(total)
    }
}

// 7Z ----------------------------------------------------------------------

pub struct SevenZProvider;

impl SevenZProvider {
    fn map_read_error(path: &Path, entry: &str, error: SevenZError) -> MuError {
        match error {
            SevenZError::PasswordRequired | SevenZError::MaybeBadPassword(_) => {
                MuError::ArchivePasswordRequired {
                    path: path.to_path_buf(),
                }
            }
            other => read_failed(path, entry, other),
        }
    }

    fn map_error(path: &Path, error: SevenZError) -> MuError {
        match error {
            SevenZError::PasswordRequired | SevenZError::MaybeBadPassword(_) => {
                MuError::ArchivePasswordRequired {
                    path: path.to_path_buf(),
                }
            }
            other => MuError::ArchiveListFailed {
                path: path.to_path_buf(),
                reason: other.to_string(),
            },
        }
    }
}

impl ArchiveFormatProvider for SevenZProvider {
    fn format(&self) -> ArchiveFormat {
        ArchiveFormat::SevenZ
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["7z"]
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<ArchiveEntry>> {
        let file = open_archive(path)?;
        let reader = sevenz_rust2::SevenZReader::new(file, SevenZPassword::empty())
            .map_err(|e| Self::map_error(path, e))?;

        Ok(reader
            .archive()
            .files
            .iter()
            .map(|e| ArchiveEntry::new(&e.name, e.size, e.is_directory))
            .collect())
    }

    fn copy_entry(&self, path: &Path, entry: &str, out: &mut dyn Write) -> Result<u64> {
        let file = open_archive(path)?;
        let wanted = normalize_entry_path(entry);
        let mut copied: Option<io::Result<u64>> = None;

        let mut extract_fn = |item: &sevenz_rust2::SevenZArchiveEntry,
                              reader: &mut dyn Read,
                              _output_path: &PathBuf|
         -> std::result::Result<bool, SevenZError> {
            if item.is_directory || normalize_entry_path(&item.name) != wanted {
                return Ok(true);
            }
            copied = Some(io::copy(reader, out));
            Ok(false)
        };

        // 출력 경로는 extract_fn이 직접 쓰므로 사용되지 않는다
        let dest = path.parent().unwrap_or(Path::new("."));
        sevenz_rust2::decompress_with_extract_fn(file, dest, &mut extract_fn)
            .map_err(|e| Self::map_read_error(path, entry, e))?;

        match copied {
            Some(result) => result.map_err(|e| read_failed(path, entry, e)),
            None => Err(entry_not_found(path, entry)),
        }
    }

    fn extract_subtree(&self, path: &Path, entry: &str, dest: &Path) -> Result<u64> {
        let file = open_archive(path)?;
        let mut total = 0u64;
        let mut failure: Option<MuError> = None;

        // 솔리드 압축은 스트림을 한 번만 푼다
        let mut extract_fn = |item: &sevenz_rust2::SevenZArchiveEntry,
                              reader: &mut dyn Read,
                              _output_path: &PathBuf|
         -> std::result::Result<bool, SevenZError> {
            let Some(target) = subtree_target(dest, entry, &item.name) else {
                return Ok(true);
            };
            let result = if item.is_directory {
                extract_dir(&target)
            } else {
                extract_file(path, &item.name, &target, reader)
            };
            match result {
                Ok(copied) => {
                    total += copied;
                    Ok(true)
                }
                Err(e) => {
                    failure = Some(e);
                    Ok(false)
                }
            }
        };

        sevenz_rust2::decompress_with_extract_fn(file, dest, &mut extract_fn)
            .map_err(|e| Self::map_read_error(path, entry, e))?;

        match failure {
            Some(e) => Err(e),
            None => Ok(total),
        }
    }
}

// AR / DEB ----------------------------------------------------------------

/// Unix `ar` 컨테이너 (Debian 패키지 포함)
///
/// 엔트리는 모두 최상위 파일이다. `.deb`의 경우 `debian-binary`,
/// `control.tar.*`, `data.tar.*`가 보인다.
pub struct ArProvider {
    format: ArchiveFormat,
}

impl ArProvider {
    pub fn new(format: ArchiveFormat) -> Self {
        Self { format }
    }

    fn identifier(entry: &ar::Entry<'_, File>) -> String {
        let raw = String::from_utf8_lossy(entry.header().identifier()).to_string();
        // GNU ar은 이름 끝에 `/`를 붙인다
        raw.trim_end_matches('/').to_string()
    }

    fn list_failed(path: &Path, e: io::Error) -> MuError {
        MuError::ArchiveListFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

impl ArchiveFormatProvider for ArProvider {
    fn format(&self) -> ArchiveFormat {
        self.format
    }

    fn extensions(&self) -> &'static [&'static str] {
        match self.format {
            ArchiveFormat::Deb => &["deb"],
            _ => &["ar", "a"],
        }
    }

    fn list_entries(&self, path: &Path) -> Result<Vec<ArchiveEntry>> {
        let mut archive = ar::Archive::new(open_archive(path)?);
        let mut entries = Vec::new();
        while let Some(entry_result) = archive.next_entry() {
            let entry = entry_result.map_err(|e| Self::list_failed(path, e))?;
            let header = entry.header();
            let mut item = ArchiveEntry::new(&Self::identifier(&entry), header.size(), false);
            item.modified = unix_time(header.mtime());
            item.mode = Some(header.mode());
            entries.push(item);
        }
        Ok(entries)
    }

    fn copy_entry(&self, path: &Path, entry: &str, out: &mut dyn Write) -> Result<u64> {
        let wanted = normalize_entry_path(entry);
        let mut archive = ar::Archive::new(open_archive(path)?);
        while let Some(entry_result) = archive.next_entry() {
            let mut ar_entry = entry_result.map_err(|e| read_failed(path, entry, e))?;
            if normalize_entry_path(&Self::identifier(&ar_entry)) == wanted {
                return io::copy(&mut ar_entry, out).map_err(|e| read_failed(path, entry, e));
            }
        }
        Err(entry_not_found(path, entry))
    }

    fn extract_subtree(&self, path: &Path, entry: &str, dest: &Path) -> Result<u64> {
        let mut archive = ar::Archive::new(open_archive(path)?);
        let mut total = 0u64;
        while let Some(entry_result) = archive.next_entry() {
            let mut ar_entry = entry_result.map_err(|e| read_failed(path, entry, e))?;
            let name = Self::identifier(&ar_entry);
            let Some(target) = subtree_target(dest, entry, &name) else {
                continue;
            };
            total += extract_file(path, &name, &target, &mut ar_entry)?;
        }
        Ok(total)
    }
}

// Registry ----------------------------------------------------------------

/// 등록된 압축 포맷 목록
pub struct ArchiveRegistry {
    providers: Vec<Box<dyn ArchiveFormatProvider>>,
}

impl Default for ArchiveRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(ZipProvider::new(ArchiveFormat::Zip)));
        registry.register(Box::new(ZipProvider::new(ArchiveFormat::Jar)));
        registry.register(Box::new(ZipProvider::new(ArchiveFormat::War)));
        registry.register(Box::new(TarProvider::new(ArchiveFormat::Tar)));
        registry.register(Box::new(TarProvider::new(ArchiveFormat::TarGz)));
        registry.register(Box::new(TarProvider::new(ArchiveFormat::TarZst)));
        registry.register(Box::new(SevenZProvider));
        registry.register(Box::new(ArProvider::new(ArchiveFormat::Deb)));
        registry.register(Box::new(ArProvider::new(ArchiveFormat::Ar)));
        registry
    }
}

impl ArchiveRegistry {
    pub fn empty() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    pub fn register(&mut self, provider: Box<dyn ArchiveFormatProvider>) {
        self.providers.push(provider);
    }

    /// 파일 이름으로 제공자 선택 (가장 긴 확장자가 우선)
    pub fn provider_for_name(&self, file_name: &str) -> Option<&dyn ArchiveFormatProvider> {
        self.providers
            .iter()
            .filter_map(|p| p.matched_extension_len(file_name).map(|len| (len, p)))
            .max_by_key(|(len, _)| *len)
            .map(|(_, p)| p.as_ref())
    }

    pub fn provider_for(&self, path: &Path) -> Option<&dyn ArchiveFormatProvider> {
        let name = path.file_name()?.to_string_lossy();
        self.provider_for_name(&name)
    }

    pub fn is_archive_name(&self, file_name: &str) -> bool {
        self.provider_for_name(file_name).is_some()
    }

    fn require(&self, path: &Path) -> Result<&dyn ArchiveFormatProvider> {
        self.provider_for(path)
            .ok_or_else(|| MuError::ArchiveUnsupportedFormat {
                path: path.to_path_buf(),
            })
    }

    pub fn list_entries(&self, path: &Path) -> Result<Vec<ArchiveEntry>> {
        let provider = self.require(path)?;
        let entries = provider.list_entries(path)?;
        tracing::debug!(
            path = %path.display(),
            format = provider.format().display_name(),
            count = entries.len(),
            "archive listed"
        );
        Ok(entries.into_iter().filter(|e| !e.path.is_empty()).collect())
    }

    pub fn copy_entry(&self, path: &Path, entry: &str, out: &mut dyn Write) -> Result<u64> {
        self.require(path)?.copy_entry(path, entry, out)
    }

    pub fn extract_subtree(&self, path: &Path, entry: &str, dest: &Path) -> Result<u64> {
        let provider = self.require(path)?;
        let copied = provider.extract_subtree(path, entry, dest)?;
        tracing::debug!(
            path = %path.display(),
            entry,
            format = provider.format().display_name(),
            bytes = copied,
            "archive subtree extracted"
        );
        Ok(copied)
    }
}

/// 압축 폴더의 직계 자식 계산
///
/// 엔트리 경로의 첫 요소로 묶고, 명시되지 않은 중간 디렉토리도 만든다.
/// 같은 이름의 파일과 디렉토리가 있으면 디렉토리가 이긴다.
pub fn archive_children(all_entries: &[ArchiveEntry], current_dir: &str) -> Vec<ArchiveEntry> {
    use std::collections::BTreeMap;

    let current_dir = normalize_entry_path(current_dir);
    let prefix = if current_dir.is_empty() {
        String::new()
    } else {
        format!("{}/", current_dir)
    };

    let mut map: BTreeMap<String, ArchiveEntry> = BTreeMap::new();
    for entry in all_entries {
        let Some(rest) = entry.path.strip_prefix(&prefix) else {
            continue;
        };
        if rest.is_empty() {
            continue;
        }
        let mut split = rest.splitn(2, '/');
        let first = split.next().unwrap_or_default();
        let has_more = split.next().is_some();
        let full_rel = format!("{}{}", prefix, first);
        let is_dir = entry.is_dir || has_more;

        // 직계 엔트리의 메타데이터만 사용
        let candidate = if has_more {
            ArchiveEntry::new(&full_rel, 0, true)
        } else {
            ArchiveEntry {
                path: full_rel.clone(),
                size: if is_dir { 0 } else { entry.size },
                is_dir,
                modified: entry.modified,
                mode: entry.mode,
            }
        };

        map.entry(full_rel)
            .and_modify(|existing| {
                if candidate.is_dir && !existing.is_dir {
                    *existing = candidate.clone();
                } else if existing.is_dir && candidate.is_dir && !has_more {
                    existing.modified = candidate.modified.or(existing.modified);
                    existing.mode = candidate.mode.or(existing.mode);
                }
            })
            .or_insert(candidate);
    }

    map.into_values().collect()
}

/// 압축 내부 경로가 디렉토리인지 (명시적이거나 하위 엔트리가 있으면)
pub fn is_archive_dir(all_entries: &[ArchiveEntry], entry: &str) -> bool {
    let entry = normalize_entry_path(entry);
    if entry.is_empty() {
        return true;
    }
    let prefix = format!("{}/", entry);
    all_entries
        .iter()
        .any(|e| (e.path == entry && e.is_dir) || e.path.starts_with(&prefix))
}
