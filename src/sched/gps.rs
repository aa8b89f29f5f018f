//! GPS（广义处理器共享）
//!
//! 按比特粒度公平分享链路的理想流体模型：任意时刻所有活跃流均分容量，
//! 每个活跃流获得 `capacity / active_count` 服务单元每时间单位。
//!
//! 实现为离散的"轮"抽象：一轮向每个活跃流授予一个服务单元，
//! 因此一轮的墙钟开销是 `active_count / capacity`。为了在包长成千上万
//! 服务单元的轨迹上保持可行的运行时间，采用双速推进：
//! 远离事件边界时整轮快进，临近到达或完成时退化为逐单元步进，
//! 在事件边界上保持精确的比特级公平语义。

use tracing::{debug, info};

use crate::sim::{Link, Packet, RunReport};

use super::{ConfigError, Scheduler, validate};

#[derive(Debug)]
pub struct Gps {
    link: Link,
}

impl Gps {
    pub fn new(arrivals: Vec<Packet>, capacity: f64) -> Result<Self, ConfigError> {
        validate(&arrivals, capacity)?;
        Ok(Self {
            link: Link::new(arrivals, capacity),
        })
    }

    /// 在下一个到达之前可整轮执行的轮数。
    /// 一轮耗时 `active_count / capacity`，因此上界是
    /// `floor(time_to_next_arrival * capacity / active_count)`。
    fn rounds_before_arrival(&self, active: usize) -> u64 {
        match self.link.next_arrival_time() {
            Some(t) => {
                let dt = t - self.link.now();
                debug_assert!(dt >= 0.0, "pending arrival in the past");
                (dt * self.link.capacity() / active as f64).floor() as u64
            }
            None => u64::MAX,
        }
    }

    /// 最早完成的队首包还能完整承受的轮数：`min(ceil(remaining) - 1)`，
    /// 下限 0。最后一个单元保留为离散的完成事件：完成会改变
    /// 活跃流数量，必须先观察到再继续快进。
    fn rounds_before_completion(&self) -> u64 {
        self.link
            .flows()
            .heads()
            .map(|p| (p.remaining.ceil() as u64).saturating_sub(1))
            .min()
            .expect("at least one active flow")
    }

    /// 整轮快进：时钟前进 `skip` 轮，每个活跃队首的剩余量减少 `skip`。
    /// 按构造不会有包在此完成。
    fn bulk_rounds(&mut self, skip: u64, active: usize) {
        let dt = skip as f64 * active as f64 / self.link.capacity();
        for head in self.link.flows_mut().heads_mut() {
            head.remaining -= skip as f64;
            assert!(
                head.remaining > 0.0,
                "bulk round skip must not complete a packet"
            );
        }
        self.link.advance(dt);
    }

    /// 逐单元步进一轮：按插入顺序给每个活跃流发一个服务单元，
    /// 队首归零立即完成。每发一个单元就重新检查到达：
    /// 新到达的流必须在下一个单元授予之前参与分享。
    fn unit_round(&mut self) {
        let unit = 1.0 / self.link.capacity();
        for idx in 0..self.link.flows().len() {
            let flow = self.link.flows().flow_at(idx);
            let completed = {
                let Some(head) = self.link.flows_mut().queue_mut(flow).front_mut() else {
                    continue;
                };
                head.remaining -= 1.0;
                head.remaining <= 0.0
            };
            self.link.advance(unit);
            if completed {
                let pkt = self
                    .link
                    .flows_mut()
                    .queue_mut(flow)
                    .pop_front()
                    .expect("head just serviced");
                self.link.finish(pkt);
            }
            if self.link.enqueue_ready() > 0 {
                break;
            }
        }
    }
}

impl Scheduler for Gps {
    fn label(&self) -> &'static str {
        "GPS"
    }

    #[tracing::instrument(skip(self), fields(discipline = self.label(), capacity = self.link.capacity()))]
    fn run(&mut self) {
        info!("▶️  开始运行 GPS 仿真");
        while !self.link.is_done() {
            self.link.enqueue_ready();
            let active = self.link.flows().active_count();
            if active == 0 {
                let skipped = self.link.idle_skip();
                debug_assert!(skipped, "not done implies pending arrivals");
                continue;
            }
            let skip = self
                .rounds_before_arrival(active)
                .min(self.rounds_before_completion());
            if skip > 0 {
                debug!(skip, active, now = self.link.now(), "整轮快进");
                self.bulk_rounds(skip, active);
            } else {
                self.unit_round();
            }
        }
        info!(final_clock = self.link.now(), "✅ GPS 仿真完成");
    }

    fn link(&self) -> &Link {
        &self.link
    }

    fn into_report(self) -> RunReport {
        self.link.into_report()
    }
}
