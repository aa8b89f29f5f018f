//! 调度算法（Scheduling disciplines）
//!
//! 提供 GPS / RR / DRR 三种链路调度算法。三者共享相同的到达馈送、
//! 流队列与指标记录行为（`crate::sim::Link`），只在服务算法上不同。

use thiserror::Error;

use crate::sim::{Link, Packet, RunReport};

mod drr;
mod gps;
mod rr;

pub use drr::{DeficitPolicy, Drr};
pub use gps::Gps;
pub use rr::RoundRobin;

/// DRR 的参考量子值（服务单元）
pub const DEFAULT_QUANTUM: f64 = 500.0;

/// 配置错误：构造即失败，绝不在错误输入上产出无声的错误指标。
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("arrival sequence is empty")]
    EmptyArrivals,
    #[error("link capacity must be positive and finite, got {0}")]
    NonPositiveCapacity(f64),
    #[error("quantum must be positive and finite, got {0}")]
    NonPositiveQuantum(f64),
    #[error("packet {index} has non-positive size {size}")]
    NonPositivePacketSize { index: usize, size: f64 },
    #[error("arrivals not sorted by arrival time at index {index}")]
    UnsortedArrivals { index: usize },
}

/// 链路调度器抽象：从同一份到达序列出发，一次性运行到
/// 馈送与所有队列为空，然后交出运行报告。
pub trait Scheduler {
    /// 算法名称（用于结果文档的键）
    fn label(&self) -> &'static str;

    /// 运行仿真直到终止
    fn run(&mut self);

    /// 读取共享链路状态
    fn link(&self) -> &Link;

    /// 结束并取出运行报告
    fn into_report(self) -> RunReport
    where
        Self: Sized;
}

/// 共享的前置条件校验：非空、已排序、包大小为正、容量为正。
pub(crate) fn validate(arrivals: &[Packet], capacity: f64) -> Result<(), ConfigError> {
    if arrivals.is_empty() {
        return Err(ConfigError::EmptyArrivals);
    }
    if !(capacity > 0.0 && capacity.is_finite()) {
        return Err(ConfigError::NonPositiveCapacity(capacity));
    }
    for (index, pkt) in arrivals.iter().enumerate() {
        if !(pkt.size > 0.0 && pkt.size.is_finite()) {
            return Err(ConfigError::NonPositivePacketSize {
                index,
                size: pkt.size,
            });
        }
        if index > 0 && pkt.arrival_time < arrivals[index - 1].arrival_time {
            return Err(ConfigError::UnsortedArrivals { index });
        }
    }
    Ok(())
}
