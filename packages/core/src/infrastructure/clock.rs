//! Wall clock backed by the shared time helper.

use kaiwa_shared::time::get_jst_timestamp;

use crate::domain::{Clock, Timestamp};

/// Clock reading the current JST time in milliseconds.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::new(get_jst_timestamp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_matches_shared_time() {
        // テスト項目: SystemClock が共有の時刻ヘルパーと同じ時刻系を返す
        // given (前提条件):
        let before = get_jst_timestamp();

        // when (操作):
        let now = SystemClock.now();

        // then (期待する結果):
        assert!(now.value() >= before);
    }
}
