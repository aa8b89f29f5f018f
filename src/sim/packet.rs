//! 数据包类型
//!
//! 定义到达记录及其服务状态。

/// 竞争共享链路的数据包。
///
/// `remaining` 以服务单元计，仅被 GPS 按单元递减；
/// RR/DRR 整包原子发送，从不触碰它。
#[derive(Debug, Clone, PartialEq)]
pub struct Packet {
    pub flow: u64,
    pub size: f64,
    pub arrival_time: f64,
    pub remaining: f64,
}

impl Packet {
    /// 创建新数据包，剩余服务量等于总大小
    pub fn new(flow: u64, size: f64, arrival_time: f64) -> Self {
        Self {
            flow,
            size,
            arrival_time,
            remaining: size,
        }
    }
}
