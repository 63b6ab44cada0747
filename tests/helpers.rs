#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use linelog::{Flags, Level, Logger};

/// In-memory sink shared between the logger and the test body.
#[derive(Clone, Default)]
pub struct Mem(pub Arc<Mutex<Vec<u8>>>);

impl Write for Mem {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(bytes);
        Ok(bytes.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

pub fn mem_logger(name: &str, level: Level, flags: Flags) -> (Logger, Arc<Mutex<Vec<u8>>>) {
    let buf = Arc::new(Mutex::new(Vec::new()));
    let lg = Logger::builder(name)
        .level(level)
        .flags(flags)
        .writer(Box::new(Mem(buf.clone())))
        .build()
        .unwrap();
    (lg, buf)
}

pub fn text_of(buf: &Arc<Mutex<Vec<u8>>>) -> String {
    String::from_utf8(buf.lock().unwrap().clone()).unwrap()
}

pub fn lines_from(buf: &Arc<Mutex<Vec<u8>>>) -> Vec<String> {
    text_of(buf)
        .lines()
        .map(std::string::ToString::to_string)
        .collect()
}
