//! jsonlog - サービス向け構造化JSONロガー
//!
//! メッセージと任意のフィールドを受け取り、レベルで絞り込んだうえで
//! JSON1レコードを出力先に書き込む。
//!
//! ```no_run
//! use jsonlog::{ErrorValue, LogInput, LogOptions, Logger};
//!
//! let mut log = Logger::new();
//! log.init(LogOptions::default().with_correlation_id("abc").with_compact_print(true));
//! log.info("started")?;
//! log.error(
//!     LogInput::new("request failed")
//!         .field("status", 502)
//!         .field("error", ErrorValue::new("UpstreamError", "bad gateway")),
//! )?;
//! # Ok::<(), jsonlog::LogError>(())
//! ```

pub mod bigint;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod level;
pub mod logger;
pub mod record;
pub mod sink;
pub mod value;

pub use config::{LogOptions, LoggerConfig};
pub use error::{ConfigError, InvalidBigInt, LogError, UnknownLevel};
pub use input::LogInput;
pub use level::LogLevel;
pub use logger::Logger;
pub use sink::{Destination, LogSink, MemorySink, SplitSink, StdStreams, WriterSink};
pub use value::{BigInt, ErrorValue, Fields, LogValue};
