use serde::{Deserialize, Serialize};

/// The three command-token pools on a player's sheet
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandPool {
    Tactic,
    Fleet,
    Strategy,
}

/// A player's command sheet: token pools plus the trade good area.
///
/// Pools never go negative; spending from an empty pool reports failure
/// instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSheet {
    pub tactic_pool: u32,
    pub fleet_pool: u32,
    pub strategy_pool: u32,
    trade_goods: u32,
}

impl CommandSheet {
    /// Starting allocation: three tactic, three fleet, two strategy
    pub fn new() -> Self {
        Self {
            tactic_pool: 3,
            fleet_pool: 3,
            strategy_pool: 2,
            trade_goods: 0,
        }
    }

    fn pool_mut(&mut self, pool: CommandPool) -> &mut u32 {
        match pool {
            CommandPool::Tactic => &mut self.tactic_pool,
            CommandPool::Fleet => &mut self.fleet_pool,
            CommandPool::Strategy => &mut self.strategy_pool,
        }
    }

    pub fn pool(&self, pool: CommandPool) -> u32 {
        match pool {
            CommandPool::Tactic => self.tactic_pool,
            CommandPool::Fleet => self.fleet_pool,
            CommandPool::Strategy => self.strategy_pool,
        }
    }

    /// Gain a command token in the given pool
    pub fn gain_token(&mut self, pool: CommandPool) {
        *self.pool_mut(pool) += 1;
    }

    /// Spend a tactic token. Returns false when the pool is empty.
    pub fn spend_tactic_token(&mut self) -> bool {
        if self.tactic_pool == 0 {
            return false;
        }
        self.tactic_pool -= 1;
        true
    }

    /// Spend a strategy token. Returns false when the pool is empty.
    pub fn spend_strategy_token(&mut self) -> bool {
        if self.strategy_pool == 0 {
            return false;
        }
        self.strategy_pool -= 1;
        true
    }

    /// Move tokens between pools. Returns false if the source pool is short.
    pub fn redistribute(&mut self, from: CommandPool, to: CommandPool, count: u32) -> bool {
        if self.pool(from) < count {
            return false;
        }
        *self.pool_mut(from) -= count;
        *self.pool_mut(to) += count;
        true
    }

    pub fn total_tokens(&self) -> u32 {
        self.tactic_pool + self.fleet_pool + self.strategy_pool
    }

    pub fn trade_goods(&self) -> u32 {
        self.trade_goods
    }

    pub fn gain_trade_goods(&mut self, amount: u32) {
        self.trade_goods += amount;
    }

    /// Spend trade goods. Returns false when there are not enough.
    pub fn spend_trade_goods(&mut self, amount: u32) -> bool {
        if self.trade_goods < amount {
            return false;
        }
        self.trade_goods -= amount;
        true
    }
}

impl Default for CommandSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_allocation() {
        let sheet = CommandSheet::new();
        assert_eq!(sheet.tactic_pool, 3);
        assert_eq!(sheet.fleet_pool, 3);
        assert_eq!(sheet.strategy_pool, 2);
        assert_eq!(sheet.total_tokens(), 8);
    }

    #[test]
    fn test_spend_from_empty_pool_fails() {
        let mut sheet = CommandSheet::new();
        assert!(sheet.spend_tactic_token());
        assert!(sheet.spend_tactic_token());
        assert!(sheet.spend_tactic_token());
        assert!(!sheet.spend_tactic_token());
        assert_eq!(sheet.tactic_pool, 0);
    }

    #[test]
    fn test_redistribute() {
        let mut sheet = CommandSheet::new();
        assert!(sheet.redistribute(CommandPool::Strategy, CommandPool::Fleet, 2));
        assert_eq!(sheet.strategy_pool, 0);
        assert_eq!(sheet.fleet_pool, 5);
        assert!(!sheet.redistribute(CommandPool::Strategy, CommandPool::Tactic, 1));
        assert_eq!(sheet.total_tokens(), 8);
    }

    #[test]
    fn test_trade_goods_never_negative() {
        let mut sheet = CommandSheet::new();
        sheet.gain_trade_goods(2);
        assert!(!sheet.spend_trade_goods(3));
        assert!(sheet.spend_trade_goods(2));
        assert_eq!(sheet.trade_goods(), 0);
    }
}
