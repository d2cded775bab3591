use crate::models::file_entry::FileEntry;
use crate::utils::error::Result;
use crate::vfs::{FileSystem, VfsPath};
use std::cmp::Ordering;
use std::collections::HashSet;

/// 정렬 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    /// 이름
    Name,
    /// 크기
    Size,
    /// 수정 날짜
    Modified,
    /// 확장자
    Extension,
}

impl SortBy {
    pub fn label(&self) -> &'static str {
        match self {
            SortBy::Name => "Name",
            SortBy::Size => "Size",
            SortBy::Modified => "Date",
            SortBy::Extension => "Ext",
        }
    }
}

/// 정렬 순서
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// 오름차순
    Ascending,
    /// 내림차순
    Descending,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

/// 패널 상태
///
/// `selected_index`는 ".." 행을 포함한 화면 행 인덱스입니다.
/// 상위 폴더가 있으면 0번 행이 "..", 엔트리는 1번 행부터 시작합니다.
#[derive(Debug, Clone)]
pub struct PanelState {
    /// 현재 경로
    pub current_path: VfsPath,
    /// 파일 목록 (정렬, 숨김 필터 적용 후)
    pub entries: Vec<FileEntry>,
    /// 선택된 행 인덱스
    pub selected_index: usize,
    /// 스크롤 오프셋
    pub scroll_offset: usize,
    /// 정렬 기준
    pub sort_by: SortBy,
    /// 정렬 순서
    pub sort_order: SortOrder,
    /// 숨김 파일 표시 여부
    pub show_hidden: bool,
    /// 마킹된 항목 이름
    pub marked: HashSet<String>,
}

impl PanelState {
    /// 새 패널 상태 생성
    pub fn new(path: VfsPath) -> Self {
        Self {
            current_path: path,
            entries: Vec::new(),
            selected_index: 0,
            scroll_offset: 0,
            sort_by: SortBy::Name,
            sort_order: SortOrder::Ascending,
            show_hidden: false,
            marked: HashSet::new(),
        }
    }

    /// ".." 행 표시 여부
    pub fn has_parent(&self) -> bool {
        self.current_path.parent().is_some()
    }

    fn parent_offset(&self) -> usize {
        usize::from(self.has_parent())
    }

    /// ".." 행 포함 전체 행 수
    pub fn row_count(&self) -> usize {
        self.entries.len() + self.parent_offset()
    }

    /// 파일 목록 새로고침
    ///
    /// 현재 경로를 다시 읽고, 선택 위치는 같은 이름의 항목으로 복원합니다.
    pub fn refresh(&mut self, filesystem: &FileSystem) -> Result<()> {
        let focused = self.selected_entry().map(|e| e.name.clone());
        let entries = filesystem.list(&self.current_path)?;
        self.apply_entries(entries);
        if let Some(name) = focused {
            self.select_by_name(&name);
        }
        self.clamp_selection();
        Ok(())
    }

    /// 경로 변경
    ///
    /// 목록을 먼저 읽고, 실패하면 기존 상태를 유지합니다.
    pub fn change_directory(&mut self, path: VfsPath, filesystem: &FileSystem) -> Result<()> {
        let entries = filesystem.list(&path)?;
        self.current_path = path;
        self.selected_index = 0;
        self.scroll_offset = 0;
        self.marked.clear();
        self.apply_entries(entries);
        Ok(())
    }

    fn apply_entries(&mut self, mut entries: Vec<FileEntry>) {
        if !self.show_hidden {
            entries.retain(|entry| !entry.is_hidden);
        }
        self.entries = entries;
        self.sort_entries();

        let names: HashSet<&str> = self.entries.iter().map(|e| e.name.as_str()).collect();
        self.marked.retain(|name| names.contains(name.as_str()));
    }

    /// 현재 기준으로 정렬 (디렉토리 우선)
    pub fn sort_entries(&mut self) {
        let sort_by = self.sort_by;
        let order = self.sort_order;
        self.entries.sort_by(|a, b| {
            // 디렉토리는 정렬 순서와 무관하게 항상 위
            match (a.is_directory(), b.is_directory()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => {}
            }
            let ordering = compare_entries(a, b, sort_by);
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }

    /// 정렬 기준 변경 (같은 기준이면 순서 토글)
    pub fn set_sort(&mut self, sort_by: SortBy) {
        if self.sort_by == sort_by {
            self.sort_order = self.sort_order.toggled();
        } else {
            self.sort_by = sort_by;
            self.sort_order = SortOrder::Ascending;
        }
        self.resort_keeping_focus();
    }

    pub fn reverse_order(&mut self) {
        self.sort_order = self.sort_order.toggled();
        self.resort_keeping_focus();
    }

    fn resort_keeping_focus(&mut self) {
        let focused = self.selected_entry().map(|e| e.name.clone());
        self.sort_entries();
        if let Some(name) = focused {
            self.select_by_name(&name);
        }
    }

    /// 정렬 상태 표시 (예: "Name ↑")
    pub fn sort_indicator(&self) -> String {
        let arrow = match self.sort_order {
            SortOrder::Ascending => "↑",
            SortOrder::Descending => "↓",
        };
        format!("{} {}", self.sort_by.label(), arrow)
    }

    /// ".." 행 선택 여부
    pub fn is_parent_selected(&self) -> bool {
        self.has_parent() && self.selected_index == 0
    }

    /// 선택된 항목 반환 (".." 행이면 None)
    pub fn selected_entry(&self) -> Option<&FileEntry> {
        let offset = self.parent_offset();
        if self.selected_index < offset {
            return None;
        }
        self.entries.get(self.selected_index - offset)
    }

    /// 이름으로 선택 이동
    pub fn select_by_name(&mut self, name: &str) -> bool {
        match self.entries.iter().position(|e| e.name == name) {
            Some(idx) => {
                self.selected_index = idx + self.parent_offset();
                true
            }
            None => false,
        }
    }

    /// 대소문자 무시 이름 검색
    pub fn find_by_name_ignore_case(&self, name: &str) -> Option<&FileEntry> {
        let lower = name.to_lowercase();
        self.entries.iter().find(|e| e.name.to_lowercase() == lower)
    }

    pub fn move_selection(&mut self, delta: isize) {
        let rows = self.row_count();
        if rows == 0 {
            self.selected_index = 0;
            return;
        }
        let max = rows - 1;
        let next = self.selected_index as isize + delta;
        self.selected_index = next.clamp(0, max as isize) as usize;
    }

    pub fn select_first(&mut self) {
        self.selected_index = 0;
    }

    pub fn select_last(&mut self) {
        self.selected_index = self.row_count().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let rows = self.row_count();
        if self.selected_index >= rows {
            self.selected_index = rows.saturating_sub(1);
        }
    }

    /// 선택 행이 화면에 보이도록 스크롤 조정
    pub fn adjust_scroll(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected_index < self.scroll_offset {
            self.scroll_offset = self.selected_index;
        } else if self.selected_index >= self.scroll_offset + visible_height {
            self.scroll_offset = self.selected_index + 1 - visible_height;
        }
    }

    // === 마킹 ===

    /// 선택 항목 마킹 토글. ".." 행이면 false
    pub fn toggle_mark_selected(&mut self) -> bool {
        let Some(name) = self.selected_entry().map(|e| e.name.clone()) else {
            return false;
        };
        if !self.marked.remove(&name) {
            self.marked.insert(name);
        }
        true
    }

    pub fn is_marked(&self, entry: &FileEntry) -> bool {
        self.marked.contains(&entry.name)
    }

    pub fn mark_all(&mut self) {
        self.marked = self.entries.iter().map(|e| e.name.clone()).collect();
    }

    pub fn unmark_all(&mut self) {
        self.marked.clear();
    }

    pub fn invert_marks(&mut self) {
        self.marked = self
            .entries
            .iter()
            .filter(|e| !self.marked.contains(&e.name))
            .map(|e| e.name.clone())
            .collect();
    }

    /// 마킹된 항목 (화면 순서)
    pub fn marked_entries(&self) -> Vec<&FileEntry> {
        self.entries.iter().filter(|e| self.is_marked(e)).collect()
    }

    /// 작업 대상: 마킹된 항목, 없으면 선택 항목
    pub fn target_entries(&self) -> Vec<&FileEntry> {
        let marked = self.marked_entries();
        if !marked.is_empty() {
            return marked;
        }
        self.selected_entry().into_iter().collect()
    }

    /// 파일 개수 반환
    pub fn file_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_file()).count()
    }

    /// 디렉토리 개수 반환
    pub fn dir_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_directory()).count()
    }

    /// 전체 크기 반환 (바이트)
    pub fn total_size(&self) -> u64 {
        self.entries.iter().map(|e| e.size).sum()
    }

    pub fn marked_size(&self) -> u64 {
        self.marked_entries().iter().map(|e| e.size).sum()
    }
}

fn compare_entries(a: &FileEntry, b: &FileEntry, sort_by: SortBy) -> Ordering {
    let by_name = || a.name.to_lowercase().cmp(&b.name.to_lowercase());
    match sort_by {
        SortBy::Name => by_name(),
        SortBy::Size => a.size.cmp(&b.size).then_with(by_name),
        SortBy::Modified => a.modified.cmp(&b.modified).then_with(by_name),
        SortBy::Extension => a.extension().cmp(&b.extension()).then_with(by_name),
    }
}
