/// 한 줄 텍스트 입력 버퍼
///
/// `cursor`는 바이트 인덱스이며 항상 문자 경계에 놓인다.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    cursor: usize,
}

impl TextInput {
    /// 초기값으로 생성, 커서는 끝
    pub fn new(value: impl Into<String>) -> Self {
        let value = value.into();
        let cursor = value.len();
        Self { value, cursor }
    }

    /// 초기값으로 생성하고 확장자 앞에 커서를 둔다 (이름 변경용)
    pub fn with_cursor_before_extension(value: impl Into<String>) -> Self {
        let mut input = Self::new(value);
        if let Some(pos) = input.value.rfind('.') {
            if pos > 0 {
                input.cursor = pos;
            }
        }
        input
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn insert_char(&mut self, c: char) {
        self.value.insert(self.cursor, c);
        self.cursor += c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = self.prev_char_start(self.cursor);
        self.value.remove(prev);
        self.cursor = prev;
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.len() {
            self.value.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        if self.cursor > 0 {
            self.cursor = self.prev_char_start(self.cursor);
        }
    }

    pub fn right(&mut self) {
        if let Some(c) = self.value[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.len();
    }

    /// Ctrl-W: 커서 앞 단어 삭제
    pub fn delete_prev_word(&mut self) {
        let original = self.cursor;
        let mut pos = original;

        // 구분자 먼저 건너뛰고 단어 시작까지 이동
        while pos > 0 {
            let prev = self.prev_char_start(pos);
            if !Self::is_word_delimiter(&self.value[prev..pos]) {
                break;
            }
            pos = prev;
        }
        while pos > 0 {
            let prev = self.prev_char_start(pos);
            if Self::is_word_delimiter(&self.value[prev..pos]) {
                break;
            }
            pos = prev;
        }

        self.value.replace_range(pos..original, "");
        self.cursor = pos;
    }

    /// Ctrl-U: 전체 삭제
    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    fn prev_char_start(&self, pos: usize) -> usize {
        self.value[..pos]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn is_word_delimiter(ch: &str) -> bool {
        ch.chars()
            .all(|c| c.is_whitespace() || matches!(c, '/' | '\\' | '.' | '-' | '_' | ':' | ','))
    }
}
