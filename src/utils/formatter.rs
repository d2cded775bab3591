// Formatters - 파일 크기, 날짜, 권한 포맷팅

use chrono::{DateTime, Local};
use std::time::SystemTime;

/// 파일 크기를 읽기 쉬운 형식으로 포맷팅 (숫자와 단위 사이 공백)
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else if bytes < GB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    }
}

/// 수정 시간을 "YYYY-MM-DD HH:MM" 형식으로 포맷팅
///
/// 시간 정보가 없는 항목(일부 압축 엔트리)은 같은 폭의 공백 대신 "-"를 반환합니다.
pub fn format_date(time: Option<SystemTime>) -> String {
    match time {
        Some(time) => {
            let datetime: DateTime<Local> = time.into();
            datetime.format("%Y-%m-%d %H:%M").to_string()
        }
        None => "-".to_string(),
    }
}

/// 개수에 따라 단수/복수형 반환
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Unix 모드를 rwxr-xr-x 형식으로 변환 (모드 정보가 없으면 "-")
pub fn format_permissions(mode: Option<u32>) -> String {
    let Some(mode) = mode else {
        return "-".to_string();
    };
    let user = triplet(mode, 0o100, 0o200, 0o400);
    let group = triplet(mode, 0o010, 0o020, 0o040);
    let other = triplet(mode, 0o001, 0o002, 0o004);
    format!("{}{}{}", user, group, other)
}

fn triplet(mode: u32, exec: u32, write: u32, read: u32) -> String {
    let r = if mode & read != 0 { 'r' } else { '-' };
    let w = if mode & write != 0 { 'w' } else { '-' };
    let x = if mode & exec != 0 { 'x' } else { '-' };
    [r, w, x].iter().collect()
}
