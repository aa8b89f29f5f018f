//! 每流指标
//!
//! 记录每个流的已发送服务量与逐包时延样本。引擎只写不读；
//! 汇总统计（吞吐、均值、标准差）属于 `crate::report`。

/// 单个流的累计指标
#[derive(Debug, Clone, Default)]
pub struct FlowMetrics {
    /// 已发送的服务单元总量
    pub sent_bits: f64,
    /// 逐包排队+竞争时延，按完成顺序追加
    pub delays: Vec<f64>,
}

/// 一次调度运行的输出：最终时钟与每流指标（按流首次出现顺序）。
#[derive(Debug, Clone)]
pub struct RunReport {
    pub final_clock: f64,
    pub flows: Vec<(u64, FlowMetrics)>,
}

impl RunReport {
    /// 按流 id 查找指标
    pub fn flow(&self, id: u64) -> Option<&FlowMetrics> {
        self.flows.iter().find(|(f, _)| *f == id).map(|(_, m)| m)
    }

    /// 所有流的已发送服务量之和
    pub fn total_sent_bits(&self) -> f64 {
        self.flows.iter().map(|(_, m)| m.sent_bits).sum()
    }

    /// 所有流的完成包总数
    pub fn total_packets(&self) -> usize {
        self.flows.iter().map(|(_, m)| m.delays.len()).sum()
    }
}
