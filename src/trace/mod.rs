//! 轨迹文件解析
//!
//! 逐行解析 `flow size time` 到达记录。`#` 注释行、空行、
//! 以空格缩进的行以及不含制表符的行一律忽略；其余行按空白分割成三个字段。
//! 解析完成后按到达时间稳定排序（平局保持文件顺序）。

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::sim::Packet;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed trace line {line_no}: {content:?}")]
    Malformed { line_no: usize, content: String },
}

/// 解析一份轨迹文本为按到达时间排序的数据包序列
pub fn parse_trace(input: &str) -> Result<Vec<Packet>, TraceError> {
    let mut arrivals = Vec::new();
    for (idx, line) in input.lines().enumerate() {
        if line.is_empty() || line.starts_with('#') || line.starts_with(' ') || !line.contains('\t')
        {
            continue;
        }
        let malformed = || TraceError::Malformed {
            line_no: idx + 1,
            content: line.to_string(),
        };
        let mut fields = line.split_whitespace();
        let (Some(flow), Some(size), Some(time), None) =
            (fields.next(), fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed());
        };
        let flow: u64 = flow.parse().map_err(|_| malformed())?;
        let size: f64 = size.parse().map_err(|_| malformed())?;
        let time: f64 = time.parse().map_err(|_| malformed())?;
        if !size.is_finite() || !time.is_finite() {
            return Err(malformed());
        }
        arrivals.push(Packet::new(flow, size, time));
    }
    // 稳定排序：相同时间戳保持文件顺序
    arrivals.sort_by(|a, b| {
        a.arrival_time
            .partial_cmp(&b.arrival_time)
            .expect("arrival times validated finite")
    });
    Ok(arrivals)
}

/// 读取并解析一个轨迹文件
pub fn load_trace(path: &Path) -> Result<Vec<Packet>, TraceError> {
    let raw = fs::read_to_string(path)?;
    parse_trace(&raw)
}

/// 列出目录下的轨迹文件，按文件名排序保证确定性
pub fn find_traces(dir: &Path) -> Result<Vec<PathBuf>, TraceError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            paths.push(entry.path());
        }
    }
    paths.sort();
    Ok(paths)
}
