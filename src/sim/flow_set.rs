//! 流队列集合
//!
//! 按流 id 维护每流 FIFO 队列。迭代顺序是流首次出现的顺序，
//! 由显式的 id 列表记录：它决定 RR/DRR 的平局顺序，是可观测行为而非实现细节。

use std::collections::{HashMap, VecDeque};

use super::Packet;

#[derive(Debug, Default)]
pub struct FlowSet {
    order: Vec<u64>,
    queues: HashMap<u64, VecDeque<Packet>>,
}

impl FlowSet {
    /// 登记一个流（重复登记无副作用）
    pub fn register(&mut self, flow: u64) {
        if !self.queues.contains_key(&flow) {
            self.order.push(flow);
            self.queues.insert(flow, VecDeque::new());
        }
    }

    /// 将数据包追加到其所属流的队尾
    pub fn push(&mut self, pkt: Packet) {
        self.queues
            .get_mut(&pkt.flow)
            .expect("flow registered before push")
            .push_back(pkt);
    }

    /// 已登记的流 id，按首次出现顺序
    pub fn flow_ids(&self) -> &[u64] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 按位置取流 id（用于在可变借用队列的同时按固定顺序遍历）
    pub fn flow_at(&self, idx: usize) -> u64 {
        self.order[idx]
    }

    pub fn queue(&self, flow: u64) -> &VecDeque<Packet> {
        self.queues.get(&flow).expect("flow registered")
    }

    pub fn queue_mut(&mut self, flow: u64) -> &mut VecDeque<Packet> {
        self.queues.get_mut(&flow).expect("flow registered")
    }

    /// 当前活跃（队列非空）的流数量
    pub fn active_count(&self) -> usize {
        self.queues.values().filter(|q| !q.is_empty()).count()
    }

    pub fn all_empty(&self) -> bool {
        self.queues.values().all(|q| q.is_empty())
    }

    /// 所有活跃流的队首包（顺序不确定，仅用于与顺序无关的计算）
    pub fn heads(&self) -> impl Iterator<Item = &Packet> {
        self.queues.values().filter_map(|q| q.front())
    }

    /// 所有活跃流的队首包的可变引用
    pub fn heads_mut(&mut self) -> impl Iterator<Item = &mut Packet> {
        self.queues.values_mut().filter_map(|q| q.front_mut())
    }
}
