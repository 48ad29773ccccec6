//src/combat/src/io.rs
//! 战斗会话的输入输出缝隙
//!
//! The session never touches stdin/stdout directly; the binary wires up
//! console-backed implementations and tests drive it with scripted ones.

use std::collections::VecDeque;

/// 一次读一行玩家输入；`None` 表示输入源已经关闭
pub trait InputSource {
    fn read_line(&mut self) -> Option<String>;
}

/// 即发即忘的文本输出
pub trait MessageSink {
    fn say(&mut self, message: &str);
}

/// 预先写好的输入脚本，耗尽后返回 `None`
#[derive(Clone, Debug, Default)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}

/// 丢弃所有输出
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl MessageSink for NullSink {
    fn say(&mut self, _message: &str) {}
}

/// 收集输出供断言使用
#[derive(Clone, Debug, Default)]
pub struct BufferSink {
    pub lines: Vec<String>,
}

impl BufferSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.contains(needle))
    }
}

impl MessageSink for BufferSink {
    fn say(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_input_drains_then_closes() {
        let mut input = ScriptedInput::new(["1", "3"]);
        assert_eq!(input.read_line().as_deref(), Some("1"));
        assert_eq!(input.read_line().as_deref(), Some("3"));
        assert_eq!(input.read_line(), None);
    }

    #[test]
    fn buffer_sink_records_in_order() {
        let mut sink = BufferSink::new();
        sink.say("first");
        sink.say("second");
        assert_eq!(sink.lines, vec!["first", "second"]);
        assert!(sink.contains("sec"));
    }
}
