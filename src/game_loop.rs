//src/game_loop.rs
//! 主循环：主菜单、野外探索、随机事件与地下城推进

use character::{Character, Inventory, InventoryError};
use combat::io::{InputSource, MessageSink};
use combat::{generate_elite, generate_enemy, CombatSession, Enemy, FightOutcome};
use items::GameRng;
use save::SaveSystem;

use crate::shop::{Shop, ShopError, XP_PER_PURCHASE};

/// 游戏引擎：持有玩家、背包、存档系统和注入的IO
pub struct GameEngine<'a> {
    player: Character,
    inventory: Inventory,
    saves: SaveSystem,
    rng: GameRng,
    input: &'a mut dyn InputSource,
    output: &'a mut dyn MessageSink,
    dungeon_available: bool,
}

impl<'a> GameEngine<'a> {
    pub fn new(
        player: Character,
        inventory: Inventory,
        saves: SaveSystem,
        rng: GameRng,
        input: &'a mut dyn InputSource,
        output: &'a mut dyn MessageSink,
    ) -> Self {
        Self {
            player,
            inventory,
            saves,
            rng,
            input,
            output,
            dungeon_available: false,
        }
    }

    pub fn player(&self) -> &Character {
        &self.player
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn dungeon_available(&self) -> bool {
        self.dungeon_available
    }

    /// 主菜单循环；玩家退出或阵亡时返回
    pub fn run(&mut self) {
        loop {
            if !self.player.is_alive() {
                self.output.say(&format!(
                    "{} has fallen. The journey ends here.",
                    self.player.name
                ));
                return;
            }

            self.output.say(&format!(
                "== {} (Level {}) | {} gold ==",
                self.player.name, self.player.level, self.player.gold
            ));
            if self.dungeon_available {
                self.output
                    .say("1) Head out  2) Enter dungeon  3) Inventory  4) Save  5) Quit");
            } else {
                self.output.say(
                    "1) Head out  2) Enter dungeon (no entrance found)  3) Inventory  4) Save  5) Quit",
                );
            }

            let Some(choice) = self.input.read_line() else {
                return;
            };
            match choice.trim() {
                "1" => self.explore(),
                "2" => self.enter_dungeon(),
                "3" => self.show_inventory(),
                "4" => self.save(),
                "5" => return,
                _ => self.output.say("Invalid choice."),
            }
        }
    }

    /// 野外一步：两成概率触发随机事件，否则遭遇战
    fn explore(&mut self) {
        self.output.say("You head out into the wilds.");

        if self.rng.percent_roll() <= 20 {
            self.trigger_event();
            return;
        }

        let mut enemy = generate_enemy(self.player.level, false, false, &mut self.rng);
        let outcome = self.fight(&mut enemy);

        // 胜利后一成概率发现地下城入口
        if outcome == FightOutcome::Victory && self.rng.percent_roll() <= 10 {
            self.dungeon_available = true;
            self.output.say("You discover the entrance to a dungeon!");
        }
    }

    fn trigger_event(&mut self) {
        let roll = self.rng.percent_roll();
        if roll <= 25 {
            self.output.say("You find a small chest holding 10 gold.");
            self.player.add_gold(10);
        } else if roll <= 45 {
            self.output.say("A distant howl echoes across the plains.");
        } else if roll <= 65 {
            self.visit_merchant();
        } else if roll <= 80 {
            self.sparkling_puddle();
        } else if roll <= 95 {
            self.output.say("An elite opponent ambushes you!");
            let mut elite = generate_elite(self.player.level, &mut self.rng);
            self.fight(&mut elite);
        } else {
            self.dungeon_available = true;
            self.output.say("A dungeon entrance grinds open nearby.");
        }
    }

    /// 风险事件：喝了五五开，回10点或掉10点
    fn sparkling_puddle(&mut self) {
        self.output
            .say("A sparkling puddle blocks the path. Drink from it?");
        self.output.say("1) Yes  2) No");

        let choice = self.input.read_line().unwrap_or_default();
        if choice.trim() != "1" {
            self.output.say("You leave the puddle alone.");
            return;
        }

        if self.rng.percent_roll() <= 50 {
            self.output.say("The water is refreshing. You recover 10 HP.");
            self.player.heal(10);
        } else {
            self.output.say("The water burns! You lose 10 HP.");
            self.player.current_hp -= 10;
        }
    }

    /// 地下城：三个普通房间加一个Boss房，打穿才算通关
    fn enter_dungeon(&mut self) {
        if !self.dungeon_available {
            self.output.say("You have not found a dungeon entrance yet.");
            return;
        }
        self.dungeon_available = false;
        self.output.say("You descend into the dungeon.");

        for room in 1..=3 {
            self.output.say(&format!("Dungeon room {room}:"));
            let mut enemy = generate_enemy(self.player.level, true, false, &mut self.rng);
            match self.fight(&mut enemy) {
                FightOutcome::Victory => {}
                FightOutcome::Defeat => return,
                FightOutcome::Escaped => {
                    self.output.say("You retreat from the dungeon.");
                    return;
                }
            }
        }

        self.output.say("The boss chamber lies ahead.");
        let mut boss = generate_enemy(self.player.level, true, true, &mut self.rng);
        match self.fight(&mut boss) {
            // the per-victory autosave already covers the cleared state
            FightOutcome::Victory => self.output.say("The dungeon is cleared!"),
            FightOutcome::Defeat => {}
            FightOutcome::Escaped => self.output.say("You flee the boss chamber."),
        }
    }

    fn fight(&mut self, enemy: &mut Enemy) -> FightOutcome {
        let Self {
            player,
            inventory,
            saves,
            rng,
            input,
            output,
            ..
        } = self;

        // 自动存档失败不打断游戏
        let mut autosave =
            |c: &Character, inv: &Inventory| {
                let _ = saves.save_game(c, inv, true);
            };

        CombatSession::new(&mut **input, &mut **output)
            .with_autosave(&mut autosave)
            .resolve(player, enemy, inventory, rng)
    }

    fn visit_merchant(&mut self) {
        self.output.say("A wandering merchant waves you over.");
        let mut shop = Shop::with_random_stock(&mut self.rng);

        loop {
            for (i, item) in shop.stock().iter().enumerate() {
                self.output.say(&format!(
                    "{}) [{}] {} - {} gold ({})",
                    i + 1,
                    item.rarity,
                    item.name,
                    item.price(),
                    item.type_label()
                ));
            }
            self.output.say(&format!(
                "[B] Buy {} XP for {} gold  [S] Sell  [X] Leave",
                XP_PER_PURCHASE,
                Shop::xp_price(&self.player)
            ));

            let Some(choice) = self.input.read_line() else {
                return;
            };
            match choice.trim().to_lowercase().as_str() {
                "x" => {
                    self.output.say("The merchant nods farewell.");
                    return;
                }
                "b" => match Shop::buy_xp(&mut self.player) {
                    Ok((xp, cost)) => {
                        self.output
                            .say(&format!("You gain {xp} XP for {cost} gold."));
                    }
                    Err(_) => self.output.say("You cannot afford that."),
                },
                "s" => self.sell_dialog(),
                other => match other.parse::<usize>() {
                    Ok(n) if n >= 1 => {
                        match shop.buy(n - 1, &mut self.player, &mut self.inventory, &mut self.rng)
                        {
                            Ok(item) => self.output.say(&format!("You buy {}.", item.name)),
                            Err(ShopError::NotEnoughGold) => {
                                self.output.say("You cannot afford that.");
                            }
                            Err(ShopError::InvalidIndex) => self.output.say("Invalid choice."),
                        }
                    }
                    _ => self.output.say("Invalid choice."),
                },
            }
        }
    }

    fn sell_dialog(&mut self) {
        if self.inventory.is_empty() {
            self.output.say("Your bag is empty.");
            return;
        }

        for (i, item) in self.inventory.items().iter().enumerate() {
            self.output.say(&format!(
                "{}) [{}] {} - sells for {} gold",
                i + 1,
                item.rarity,
                item.name,
                item.sell_price()
            ));
        }
        self.output.say("Pick an item to sell, or [X] to cancel.");

        let Some(choice) = self.input.read_line() else {
            return;
        };
        let choice = choice.trim().to_lowercase();
        if choice == "x" {
            return;
        }

        match choice.parse::<usize>() {
            Ok(n) if n >= 1 => match self.inventory.sell(n - 1, &mut self.player) {
                Ok(amount) => self.output.say(&format!("Sold for {amount} gold.")),
                Err(_) => self.output.say("Invalid choice."),
            },
            _ => self.output.say("Invalid choice."),
        }
    }

    /// 背包界面：按序号装备或喝药
    fn show_inventory(&mut self) {
        loop {
            if self.inventory.is_empty() {
                self.output.say("Your bag is empty.");
                return;
            }

            for (i, item) in self.inventory.items().iter().enumerate() {
                self.output.say(&format!(
                    "{}) [{}] {} ({})",
                    i + 1,
                    item.rarity,
                    item.name,
                    item.type_label()
                ));
            }
            self.output
                .say("Pick an item to equip or drink, or [X] to close.");

            let Some(choice) = self.input.read_line() else {
                return;
            };
            let choice = choice.trim().to_lowercase();
            if choice == "x" {
                return;
            }

            let Ok(n) = choice.parse::<usize>() else {
                self.output.say("Invalid choice.");
                continue;
            };
            if n < 1 || n > self.inventory.len() {
                self.output.say("Invalid choice.");
                continue;
            }
            let index = n - 1;

            if self.inventory.items()[index].is_potion() {
                match self.inventory.use_potion_at(index, &mut self.player) {
                    Ok(item) => self.output.say(&format!("You use {}.", item.name)),
                    Err(_) => self.output.say("Invalid choice."),
                }
            } else {
                match self.inventory.equip(index, &mut self.player) {
                    Ok(()) => self.output.say("Equipped."),
                    Err(InventoryError::Character(_)) => {
                        self.output.say("That cannot be equipped.");
                    }
                    Err(_) => self.output.say("Invalid choice."),
                }
            }
        }
    }

    fn save(&mut self) {
        match self.saves.save_game(&self.player, &self.inventory, false) {
            Ok(name) => self.output.say(&format!("Game saved as \"{name}\".")),
            Err(e) => self.output.say(&error::handle_error(&e)),
        }
    }
}
