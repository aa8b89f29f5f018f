//! 亏空轮询（Deficit Round Robin）
//!
//! 每轮为有积压的流补充一个量子的信用；信用足够覆盖队首包大小时整包发送，
//! 一轮内可以连发多包。队列清空后信用按策略处理（默认归零），
//! 防止长期空闲的流囤积信用、流量恢复后不公平地突发。
//!
//! 前置条件（不由引擎强制）：量子应不小于最大包长，否则丧失无饥饿保证。

use std::collections::HashMap;

use tracing::info;

use crate::sim::{Link, Packet, RunReport};

use super::{ConfigError, Scheduler, validate};

/// 队列清空后的信用处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeficitPolicy {
    /// 清空即归零（主变体：阻止空闲信用积累）
    #[default]
    ResetOnEmpty,
    /// 保留信用（教科书式经典 DRR）
    Retain,
}

#[derive(Debug)]
pub struct Drr {
    link: Link,
    quantum: f64,
    policy: DeficitPolicy,
    deficit: HashMap<u64, f64>,
}

impl Drr {
    pub fn new(arrivals: Vec<Packet>, capacity: f64, quantum: f64) -> Result<Self, ConfigError> {
        Self::with_policy(arrivals, capacity, quantum, DeficitPolicy::default())
    }

    pub fn with_policy(
        arrivals: Vec<Packet>,
        capacity: f64,
        quantum: f64,
        policy: DeficitPolicy,
    ) -> Result<Self, ConfigError> {
        validate(&arrivals, capacity)?;
        if !(quantum > 0.0 && quantum.is_finite()) {
            return Err(ConfigError::NonPositiveQuantum(quantum));
        }
        let mut drr = Self {
            link: Link::new(arrivals, capacity),
            quantum,
            policy,
            deficit: HashMap::new(),
        };
        for &flow in drr.link.flows().flow_ids() {
            drr.deficit.insert(flow, 0.0);
        }
        Ok(drr)
    }

    /// 某个流的当前信用
    pub fn deficit(&self, flow: u64) -> f64 {
        self.deficit.get(&flow).copied().unwrap_or(0.0)
    }
}

impl Scheduler for Drr {
    fn label(&self) -> &'static str {
        "Deficit round robin (DRR)"
    }

    #[tracing::instrument(skip(self), fields(discipline = self.label(), quantum = self.quantum))]
    fn run(&mut self) {
        info!("▶️  开始运行 DRR 仿真");
        while !self.link.is_done() {
            self.link.enqueue_ready();
            for idx in 0..self.link.flows().len() {
                let flow = self.link.flows().flow_at(idx);
                // 只有此刻有包可发的流才补充信用
                if self.link.flows().queue(flow).is_empty() {
                    continue;
                }
                let credit = self.deficit.get_mut(&flow).expect("flow registered");
                *credit += self.quantum;
                // 信用允许多少发多少：一轮可以冲掉多个排队包
                while let Some(head_size) =
                    self.link.flows().queue(flow).front().map(|p| p.size)
                {
                    if self.deficit[&flow] < head_size {
                        break;
                    }
                    let pkt = self
                        .link
                        .flows_mut()
                        .queue_mut(flow)
                        .pop_front()
                        .expect("head exists");
                    *self.deficit.get_mut(&flow).expect("flow registered") -= pkt.size;
                    self.link.advance(pkt.size / self.link.capacity());
                    self.link.finish(pkt);
                }
                // 服务结束后队列已空 → 信用按策略处理（在新到达入队之前判定）
                if self.policy == DeficitPolicy::ResetOnEmpty
                    && self.link.flows().queue(flow).is_empty()
                {
                    *self.deficit.get_mut(&flow).expect("flow registered") = 0.0;
                }
                self.link.enqueue_ready();
            }
            self.link.idle_skip();
        }
        info!(final_clock = self.link.now(), "✅ DRR 仿真完成");
    }

    fn link(&self) -> &Link {
        &self.link
    }

    fn into_report(self) -> RunReport {
        self.link.into_report()
    }
}
