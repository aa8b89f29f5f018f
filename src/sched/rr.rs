//! 轮询调度（Round Robin）
//!
//! 一轮 = 按固定插入顺序遍历所有流；队列非空的流整包发送其队首。
//! 没有跨轮的公平性记忆：按包数无饥饿，但对不等包长不保证字节公平。

use tracing::info;

use crate::sim::{Link, Packet, RunReport};

use super::{ConfigError, Scheduler, validate};

#[derive(Debug)]
pub struct RoundRobin {
    link: Link,
}

impl RoundRobin {
    pub fn new(arrivals: Vec<Packet>, capacity: f64) -> Result<Self, ConfigError> {
        validate(&arrivals, capacity)?;
        Ok(Self {
            link: Link::new(arrivals, capacity),
        })
    }
}

impl Scheduler for RoundRobin {
    fn label(&self) -> &'static str {
        "Round robin (RR)"
    }

    #[tracing::instrument(skip(self), fields(discipline = self.label(), capacity = self.link.capacity()))]
    fn run(&mut self) {
        info!("▶️  开始运行 RR 仿真");
        while !self.link.is_done() {
            self.link.enqueue_ready();
            for idx in 0..self.link.flows().len() {
                let flow = self.link.flows().flow_at(idx);
                let Some(pkt) = self.link.flows_mut().queue_mut(flow).pop_front() else {
                    continue;
                };
                self.link.advance(pkt.size / self.link.capacity());
                self.link.finish(pkt);
                // 发送期间可能有新包到达：本轮中靠后的流必须看到它们
                self.link.enqueue_ready();
            }
            self.link.idle_skip();
        }
        info!(final_clock = self.link.now(), "✅ RR 仿真完成");
    }

    fn link(&self) -> &Link {
        &self.link
    }

    fn into_report(self) -> RunReport {
        self.link.into_report()
    }
}
