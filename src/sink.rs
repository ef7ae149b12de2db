//! 出力先モジュール

use crate::level::LogLevel;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

/// シリアライズ済みのログ行を書き込む出力先
pub trait LogSink {
    /// 1レコードを1回の書き込みで出力する（改行は出力先が付与する）
    fn write_line(&self, level: LogLevel, line: &str) -> io::Result<()>;
}

/// 書き込み先チャネル
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    Stderr,
}

impl Destination {
    /// ERRORは標準エラー、それ以外は標準出力
    pub fn for_level(level: LogLevel) -> Self {
        if level == LogLevel::Error {
            Destination::Stderr
        } else {
            Destination::Stdout
        }
    }
}

/// 標準出力先
///
/// 振り分けは`Destination::for_level`に従う。
#[derive(Debug, Default, Clone, Copy)]
pub struct StdStreams;

impl LogSink for StdStreams {
    fn write_line(&self, level: LogLevel, line: &str) -> io::Result<()> {
        match Destination::for_level(level) {
            Destination::Stderr => writeln!(io::stderr().lock(), "{}", line),
            Destination::Stdout => writeln!(io::stdout().lock(), "{}", line),
        }
    }
}

/// 標準出力・標準エラーに相当する2つのライターへ振り分ける出力先
#[derive(Debug)]
pub struct SplitSink<O: Write, E: Write> {
    out: Mutex<O>,
    err: Mutex<E>,
}

impl<O: Write, E: Write> SplitSink<O, E> {
    pub fn new(out: O, err: E) -> Self {
        Self {
            out: Mutex::new(out),
            err: Mutex::new(err),
        }
    }

    /// (出力側, エラー側)のライターを取り出す
    pub fn into_inner(self) -> (O, E) {
        (
            self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner()),
            self.err.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner()),
        )
    }
}

impl<O: Write, E: Write> LogSink for SplitSink<O, E> {
    fn write_line(&self, level: LogLevel, line: &str) -> io::Result<()> {
        match Destination::for_level(level) {
            Destination::Stdout => write_locked(&self.out, line),
            Destination::Stderr => write_locked(&self.err, line),
        }
    }
}

fn write_locked<W: Write>(writer: &Mutex<W>, line: &str) -> io::Result<()> {
    let mut writer = writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    writeln!(writer, "{}", line)?;
    writer.flush()
}

/// 全レベルを1つのライターに書き込む出力先
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: Mutex<W>,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// ライターを取り出す
    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write> LogSink for WriterSink<W> {
    fn write_line(&self, _level: LogLevel, line: &str) -> io::Result<()> {
        write_locked(&self.writer, line)
    }
}

/// メモリに記録する出力先（テスト用）
///
/// クローンは同じバッファを共有する。
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    records: Arc<Mutex<Vec<(LogLevel, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// 記録済みの行を取得
    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.lock().clone()
    }

    /// 記録済みの行だけを取得
    pub fn lines(&self) -> Vec<String> {
        self.lock().iter().map(|(_, line)| line.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(LogLevel, String)>> {
        self.records.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, level: LogLevel, line: &str) -> io::Result<()> {
        self.lock().push((level, line.to_string()));
        Ok(())
    }
}

impl<S: LogSink + ?Sized> LogSink for &S {
    fn write_line(&self, level: LogLevel, line: &str) -> io::Result<()> {
        (**self).write_line(level, line)
    }
}

impl<S: LogSink + ?Sized> LogSink for Box<S> {
    fn write_line(&self, level: LogLevel, line: &str) -> io::Result<()> {
        (**self).write_line(level, line)
    }
}
