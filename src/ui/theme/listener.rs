use super::data::{ColorId, FontId, ThemeColor, ThemeFont};
use std::sync::mpsc::Sender;

/// 현재 테마 변경 이벤트
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeEvent {
    FontChanged { id: FontId, font: ThemeFont },
    ColorChanged { id: ColorId, color: ThemeColor },
}

pub trait ThemeListener {
    fn theme_changed(&mut self, event: &ThemeEvent);
}

/// 리스너 등록 핸들
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// 이벤트를 채널로 전달하는 리스너
pub struct ChannelListener {
    sender: Sender<ThemeEvent>,
}

impl ChannelListener {
    pub fn new(sender: Sender<ThemeEvent>) -> Self {
        Self { sender }
    }
}

impl ThemeListener for ChannelListener {
    fn theme_changed(&mut self, event: &ThemeEvent) {
        // 수신 측이 사라졌으면 조용히 버린다
        let _ = self.sender.send(*event);
    }
}

#[derive(Default)]
pub(super) struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(ListenerId, Box<dyn ThemeListener>)>,
}

impl ListenerRegistry {
    pub fn add(&mut self, listener: Box<dyn ThemeListener>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.push((id, listener));
        id
    }

    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: ThemeEvent) {
        for (_, listener) in &mut self.listeners {
            listener.theme_changed(&event);
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }
}
