//! 共享链路状态
//!
//! 三种调度算法共享的到达馈送、流队列集合、仿真时钟与指标记录。
//! 每个调度器实例独占一份 `Link`，运行期间没有任何外部交互。

use std::collections::{HashMap, VecDeque};

use tracing::{debug, trace};

use super::clock::SimClock;
use super::flow_set::FlowSet;
use super::metrics::{FlowMetrics, RunReport};
use super::packet::Packet;

/// 共享传输链路：容量、待到达序列、每流队列、时钟与指标。
#[derive(Debug)]
pub struct Link {
    capacity: f64,
    arrivals: VecDeque<Packet>,
    flows: FlowSet,
    metrics: HashMap<u64, FlowMetrics>,
    clock: SimClock,
}

impl Link {
    /// 从已校验的到达序列构建。所有流在此登记，
    /// 迭代顺序 = 排序后序列中的首次出现顺序，整个运行期间不变。
    ///
    /// 时钟从第一个到达的时间戳开始，三种算法的初始时钟保持一致。
    pub(crate) fn new(arrivals: Vec<Packet>, capacity: f64) -> Self {
        let start = arrivals
            .first()
            .expect("arrivals validated non-empty")
            .arrival_time;
        let mut flows = FlowSet::default();
        let mut metrics = HashMap::new();
        for pkt in &arrivals {
            flows.register(pkt.flow);
            metrics.entry(pkt.flow).or_insert_with(FlowMetrics::default);
        }
        Self {
            capacity,
            arrivals: arrivals.into(),
            flows,
            metrics,
            clock: SimClock::starting_at(start),
        }
    }

    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// 当前仿真时间
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// 下一个尚未入队的到达的时间戳
    pub fn next_arrival_time(&self) -> Option<f64> {
        self.arrivals.front().map(|p| p.arrival_time)
    }

    pub fn flows(&self) -> &FlowSet {
        &self.flows
    }

    pub(crate) fn flows_mut(&mut self) -> &mut FlowSet {
        &mut self.flows
    }

    /// 前进 `dt` 个时间单位
    pub(crate) fn advance(&mut self, dt: f64) {
        self.clock.advance(dt);
    }

    /// 把所有 `arrival_time <= 当前时钟` 的到达移入其流队列，返回入队数量。
    ///
    /// 必须在每次时间推进和每次发包完成之后调用：算法的逐轮决策
    /// （比如 DRR 的"这个流现在有包吗"）必须看到刚刚到达的数据包。
    pub(crate) fn enqueue_ready(&mut self) -> usize {
        let now = self.clock.now();
        let mut admitted = 0;
        while let Some(front) = self.arrivals.front() {
            if front.arrival_time > now {
                break;
            }
            let pkt = self.arrivals.pop_front().expect("front exists");
            self.flows.push(pkt);
            admitted += 1;
        }
        if admitted > 0 {
            trace!(admitted, now, "新到达入队");
        }
        admitted
    }

    /// 记录一个完整发送完毕的数据包。每个包恰好调用一次，
    /// 调用时时钟已经走到发送完成时刻。
    ///
    /// 时延 = 逗留时间 − 包自身的串行化时间（`size/capacity`），
    /// 即纯排队+竞争时延；只可能因浮点舍入而出现趋零的负值。
    pub(crate) fn finish(&mut self, pkt: Packet) {
        let now = self.clock.now();
        let delay = now - pkt.arrival_time - pkt.size / self.capacity;
        trace!(flow = pkt.flow, size = pkt.size, delay, now, "数据包发送完成");
        let m = self
            .metrics
            .get_mut(&pkt.flow)
            .expect("flow registered at construction");
        m.sent_bits += pkt.size;
        m.delays.push(delay);
    }

    /// 所有队列为空但仍有到达未消费时，把时钟直接跳到下一个到达。
    /// 发生了跳过返回 true。
    pub(crate) fn idle_skip(&mut self) -> bool {
        if !self.flows.all_empty() {
            return false;
        }
        let Some(t) = self.next_arrival_time() else {
            return false;
        };
        if t > self.clock.now() {
            debug!(to = t, "空闲跳过：推进至下一个到达");
            self.clock.advance_to(t);
        }
        true
    }

    /// 终止判定：到达馈送为空且所有流队列为空
    pub fn is_done(&self) -> bool {
        self.arrivals.is_empty() && self.flows.all_empty()
    }

    /// 结束运行，取出报告。流按首次出现顺序排列。
    pub(crate) fn into_report(mut self) -> RunReport {
        debug_assert!(self.is_done(), "report taken before run completed");
        let final_clock = self.clock.now();
        let ids: Vec<u64> = self.flows.flow_ids().to_vec();
        let flows = ids
            .into_iter()
            .map(|f| {
                let m = self
                    .metrics
                    .remove(&f)
                    .expect("flow metrics registered at construction");
                (f, m)
            })
            .collect();
        RunReport { final_clock, flows }
    }
}
