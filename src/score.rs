// ============================================
// src/score.rs
// 1問ごとのリザルト計算
// ============================================

/// 1単語を打ち終えたときの計測値
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStats {
    /// 実際に打ったローマ字の文字数
    pub total_chars: u32,
    pub misses: u32,
    pub duration_sec: f64,
}

impl RunStats {
    /// 正確さ（%）。打鍵がなければ 100
    pub fn accuracy(&self) -> f64 {
        let attempts = (self.total_chars + self.misses) as f64;
        if attempts > 0.0 {
            (self.total_chars as f64 / attempts) * 100.0
        } else {
            100.0
        }
    }

    /// CPS = 総文字数 / 秒
    pub fn cps(&self) -> f64 {
        if self.duration_sec > 0.0 {
            self.total_chars as f64 / self.duration_sec
        } else {
            0.0
        }
    }

    pub fn score(&self) -> f64 {
        (self.cps() * 100.0) * (self.accuracy() / 100.0).powi(3) * self.total_chars as f64
    }

    /// 獲得経験値。速いほど・ミスが少ないほど多い
    pub fn xp(&self) -> u32 {
        let base_xp = self.total_chars as f64;
        let skill_bonus = 1.0 + (self.cps() / 10.0);
        let accuracy_mod = (self.accuracy() / 100.0).powi(3);
        (base_xp * skill_bonus * accuracy_mod).round() as u32
    }
}
