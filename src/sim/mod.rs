//! 仿真核心模块
//!
//! 此模块包含离散事件仿真的共享组件：仿真时钟、数据包、流队列集合、
//! 指标记录与链路状态。三种调度算法（见 `crate::sched`）都建立在这些组件之上。

// 子模块声明
mod clock;
mod flow_set;
mod link;
mod metrics;
mod packet;

// 重新导出公共接口
pub use clock::SimClock;
pub use flow_set::FlowSet;
pub use link::Link;
pub use metrics::{FlowMetrics, RunReport};
pub use packet::Packet;
