//! 仿真时钟
//!
//! 定义单调递增的仿真时钟。长轨迹会做上百万次小步推进，
//! 因此使用 Neumaier 补偿求和保证数值稳定。

/// 仿真时钟（抽象时间单位）。只能向前推进。
#[derive(Debug, Clone, Copy, Default)]
pub struct SimClock {
    sum: f64,
    /// Neumaier 补偿项，吸收每次加法的舍入误差
    comp: f64,
}

impl SimClock {
    /// 从指定时刻开始计时
    pub fn starting_at(t: f64) -> SimClock {
        SimClock { sum: t, comp: 0.0 }
    }

    /// 当前仿真时间
    pub fn now(&self) -> f64 {
        self.sum + self.comp
    }

    /// 前进 `dt` 个时间单位
    pub fn advance(&mut self, dt: f64) {
        assert!(dt >= 0.0, "clock must not move backwards: dt={dt}");
        let t = self.sum + dt;
        if self.sum.abs() >= dt.abs() {
            self.comp += (self.sum - t) + dt;
        } else {
            self.comp += (dt - t) + self.sum;
        }
        self.sum = t;
    }

    /// 跳转到绝对时刻 `t`（空闲跳过用）。重新锚定到精确的输入时间戳，
    /// 同时清空补偿项。
    pub fn advance_to(&mut self, t: f64) {
        assert!(
            t >= self.now(),
            "clock must not move backwards: now={} target={t}",
            self.now()
        );
        self.sum = t;
        self.comp = 0.0;
    }
}
