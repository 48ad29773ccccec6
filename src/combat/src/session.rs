//src/combat/src/session.rs
//! 回合制战斗状态机

use character::{Character, DamageOutcome, Inventory};
use items::{GameRng, ItemKind};

use crate::enemy::Enemy;
use crate::io::{InputSource, MessageSink};

/// 一场战斗的最终结果
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FightOutcome {
    Victory,
    Defeat,
    Escaped,
}

/// 逃跑掷骰的三种结局
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunResult {
    Escaped,
    Failed,
    Stumble,
}

impl RunResult {
    /// ≤65 逃脱，≤90 失败（敌人白打一下），其余摔倒直接判负
    pub fn from_roll(roll: i32) -> Self {
        if roll <= 65 {
            RunResult::Escaped
        } else if roll <= 90 {
            RunResult::Failed
        } else {
            RunResult::Stumble
        }
    }
}

/// 战斗会话：驱动一场战斗直到分出结果
///
/// IO 与随机数全部从外部注入；胜利后的自动存档通过回调挂接，
/// 这一层不认识存档系统。
pub struct CombatSession<'a> {
    input: &'a mut dyn InputSource,
    output: &'a mut dyn MessageSink,
    autosave: Option<&'a mut dyn FnMut(&Character, &Inventory)>,
}

impl<'a> CombatSession<'a> {
    pub fn new(input: &'a mut dyn InputSource, output: &'a mut dyn MessageSink) -> Self {
        Self {
            input,
            output,
            autosave: None,
        }
    }

    pub fn with_autosave(mut self, hook: &'a mut dyn FnMut(&Character, &Inventory)) -> Self {
        self.autosave = Some(hook);
        self
    }

    /// 打完一整场：返回胜利/失败/逃脱
    pub fn resolve(
        &mut self,
        player: &mut Character,
        enemy: &mut Enemy,
        inventory: &mut Inventory,
        rng: &mut GameRng,
    ) -> FightOutcome {
        self.output
            .say(&format!("A wild {} appears! It {}.", enemy.name, enemy.description));

        while player.current_hp > 0 && enemy.current_hp > 0 {
            self.output.say(&format!(
                "{}: {}/{} HP",
                player.name, player.current_hp, player.max_hp
            ));
            self.output.say(&format!(
                "{}: {}/{} HP",
                enemy.name, enemy.current_hp, enemy.max_hp
            ));
            self.output.say("1) Attack  2) Use potion  3) Run");

            // a closed input cannot wedge the loop, fall back to attacking
            let choice = self.input.read_line().unwrap_or_else(|| "1".to_string());

            match choice.trim() {
                "1" => {
                    self.player_attack(player, enemy, rng);
                    if enemy.is_alive() {
                        self.enemy_attack(player, enemy, rng);
                    }
                }
                "2" => {
                    let escaped = self.use_potion(player, inventory);
                    if escaped {
                        return FightOutcome::Escaped;
                    }
                    // the enemy gets its swing whether or not a potion was found
                    if enemy.is_alive() {
                        self.enemy_attack(player, enemy, rng);
                    }
                }
                "3" => match RunResult::from_roll(rng.percent_roll()) {
                    RunResult::Escaped => {
                        self.output.say("You slip away from the fight.");
                        return FightOutcome::Escaped;
                    }
                    RunResult::Failed => {
                        self.output.say("You fail to get away!");
                        if enemy.is_alive() {
                            self.enemy_attack(player, enemy, rng);
                        }
                    }
                    RunResult::Stumble => {
                        self.output
                            .say("You stumble while fleeing and hit the ground hard.");
                        player.current_hp = 0;
                    }
                },
                _ => self.output.say("Invalid choice."),
            }
        }

        self.end_fight(player, enemy, inventory)
    }

    fn player_attack(&mut self, player: &Character, enemy: &mut Enemy, rng: &mut GameRng) {
        let roll = player.attack_damage(rng);
        enemy.take_damage(roll.damage);

        if roll.crit {
            self.output
                .say(&format!("Critical hit! You strike {} for {} damage.", enemy.name, roll.damage));
        } else {
            self.output
                .say(&format!("You hit {} for {} damage.", enemy.name, roll.damage));
        }
    }

    fn enemy_attack(&mut self, player: &mut Character, enemy: &Enemy, rng: &mut GameRng) {
        match player.take_damage(enemy.damage, rng) {
            DamageOutcome::Dodged => {
                self.output.say(&format!("You dodge {}'s attack.", enemy.name));
            }
            DamageOutcome::Hit { taken, .. } => {
                self.output
                    .say(&format!("{} hits you for {} damage.", enemy.name, taken));
            }
        }
    }

    /// 喝下背包里的第一瓶药水；烟雾弹直接终结战斗
    fn use_potion(&mut self, player: &mut Character, inventory: &mut Inventory) -> bool {
        match inventory.use_first_potion(player) {
            Ok(item) => {
                self.output.say(&format!("You use {}.", item.name));
                if player.force_escape {
                    player.force_escape = false;
                    self.output.say("Smoke fills the air. You vanish from the fight.");
                    return true;
                }
            }
            Err(_) => self.output.say("You have no potions."),
        }
        false
    }

    fn end_fight(
        &mut self,
        player: &mut Character,
        enemy: &Enemy,
        inventory: &mut Inventory,
    ) -> FightOutcome {
        if player.current_hp <= 0 {
            self.output.say(&format!("{} has been defeated...", player.name));
            return FightOutcome::Defeat;
        }

        self.output.say(&format!("{} is defeated!", enemy.name));
        self.output.say(&format!(
            "You gain {} XP and {} gold.",
            enemy.xp_reward, enemy.gold_reward
        ));

        let levels = player.add_xp(enemy.xp_reward);
        for _ in 0..levels {
            self.output
                .say(&format!("{} reached level {}!", player.name, player.level));
        }
        player.add_gold(enemy.gold_reward);

        for item in &enemy.loot {
            match &item.kind {
                // gold drops are credited on top of the base reward
                ItemKind::Gold(amount) => player.add_gold(*amount),
                _ => {
                    self.output.say(&format!("Loot: {}", item.name));
                    inventory.add(item.clone());
                }
            }
        }

        if let Some(hook) = self.autosave.as_deref_mut() {
            hook(player, inventory);
        }

        FightOutcome::Victory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use character::Class;
    use items::{GameRng, Item, Rarity, StatusEffect};
    use pretty_assertions::assert_eq;

    use crate::enemy::EnemyType;
    use crate::io::{BufferSink, ScriptedInput};

    fn fixed_enemy(level: i32) -> Enemy {
        let mut rng = GameRng::new(1);
        let mut e = Enemy::new("Goblin", level, EnemyType::Normal, &mut rng);
        // drops aside from gold would make assertions seed-dependent
        e.loot.retain(|i| i.is_gold());
        e
    }

    #[test]
    fn run_roll_boundaries() {
        assert_eq!(RunResult::from_roll(1), RunResult::Escaped);
        assert_eq!(RunResult::from_roll(65), RunResult::Escaped);
        assert_eq!(RunResult::from_roll(66), RunResult::Failed);
        assert_eq!(RunResult::from_roll(90), RunResult::Failed);
        assert_eq!(RunResult::from_roll(91), RunResult::Stumble);
        assert_eq!(RunResult::from_roll(100), RunResult::Stumble);
    }

    #[test]
    fn attacking_until_victory_awards_rewards() {
        let mut player = Character::new("Tess", Class::Knight);
        player.dodge = 100; // clamped to 50, keeps the fight short but survivable
        let mut enemy = fixed_enemy(1);
        let mut inventory = Inventory::new();
        let mut rng = GameRng::new(2);

        let mut input = ScriptedInput::new(["1"; 10]);
        let mut sink = BufferSink::new();

        let outcome = CombatSession::new(&mut input, &mut sink)
            .resolve(&mut player, &mut enemy, &mut inventory, &mut rng);

        assert_eq!(outcome, FightOutcome::Victory);
        assert!(!enemy.is_alive());
        assert_eq!(player.xp, 10);
        // base reward plus the guaranteed gold drop
        assert_eq!(player.gold, 10);
        assert!(sink.contains("is defeated!"));
    }

    #[test]
    fn invalid_input_costs_no_turn() {
        let mut player = Character::new("Tess", Class::Knight);
        let hp_before = player.current_hp;
        let mut enemy = fixed_enemy(1);
        let enemy_hp_before = enemy.current_hp;
        let mut inventory = Inventory::new();
        let mut rng = GameRng::new(3);

        // garbage first, then flee on a forced-escape potion
        let mut input = ScriptedInput::new(["attack!", "2"]);
        let mut sink = BufferSink::new();
        inventory.add(Item::effect_potion("Smoke Bomb", StatusEffect::Escape));

        let outcome = CombatSession::new(&mut input, &mut sink)
            .resolve(&mut player, &mut enemy, &mut inventory, &mut rng);

        assert_eq!(outcome, FightOutcome::Escaped);
        assert!(sink.contains("Invalid choice."));
        // neither side swung during the invalid turn or the smoke-bomb exit
        assert_eq!(player.current_hp, hp_before);
        assert_eq!(enemy.current_hp, enemy_hp_before);
        assert!(!player.force_escape);
    }

    #[test]
    fn potion_action_without_potion_still_lets_enemy_swing() {
        let mut player = Character::new("Tess", Class::Knight);
        player.dodge = 0;
        let mut enemy = fixed_enemy(1);
        let mut inventory = Inventory::new();
        let mut rng = GameRng::new(4);

        let mut input = ScriptedInput::new(["2", "1", "1", "1"]);
        let mut sink = BufferSink::new();

        CombatSession::new(&mut input, &mut sink)
            .resolve(&mut player, &mut enemy, &mut inventory, &mut rng);

        assert!(sink.contains("You have no potions."));
        assert!(player.current_hp < player.max_hp);
    }

    #[test]
    fn escape_awards_nothing() {
        let mut player = Character::new("Tess", Class::Rogue);
        let mut enemy = fixed_enemy(3);
        let mut inventory = Inventory::new();
        let mut rng = GameRng::new(6);

        // advance until the next percent roll lands in the escape band
        loop {
            let mut probe = rng.clone();
            if RunResult::from_roll(probe.percent_roll()) == RunResult::Escaped {
                break;
            }
            rng.percent_roll();
        }

        let mut input = ScriptedInput::new(["3"]);
        let mut sink = BufferSink::new();

        let outcome = CombatSession::new(&mut input, &mut sink)
            .resolve(&mut player, &mut enemy, &mut inventory, &mut rng);

        assert_eq!(outcome, FightOutcome::Escaped);
        assert_eq!(player.xp, 0);
        assert_eq!(player.gold, 0);
        assert!(inventory.is_empty());
    }

    #[test]
    fn stumble_is_an_instant_defeat() {
        let mut player = Character::new("Tess", Class::Knight);
        let mut enemy = fixed_enemy(1);
        let mut inventory = Inventory::new();
        let mut rng = GameRng::new(8);

        // find a seed offset whose first percent roll lands in 91..=100
        loop {
            let mut probe = rng.clone();
            if RunResult::from_roll(probe.percent_roll()) == RunResult::Stumble {
                break;
            }
            rng.percent_roll();
        }

        let mut input = ScriptedInput::new(["3"]);
        let mut sink = BufferSink::new();

        let outcome = CombatSession::new(&mut input, &mut sink)
            .resolve(&mut player, &mut enemy, &mut inventory, &mut rng);

        assert_eq!(outcome, FightOutcome::Defeat);
        assert_eq!(player.current_hp, 0);
    }

    #[test]
    fn victory_fires_the_autosave_hook() {
        let mut player = Character::new("Tess", Class::Berserker);
        player.dodge = 100;
        let mut enemy = fixed_enemy(1);
        let mut inventory = Inventory::new();
        let mut rng = GameRng::new(9);

        let mut saved = Vec::new();
        let mut hook = |c: &Character, _inv: &Inventory| saved.push(c.name.clone());

        let mut input = ScriptedInput::new(["1"; 10]);
        let mut sink = BufferSink::new();

        let outcome = CombatSession::new(&mut input, &mut sink)
            .with_autosave(&mut hook)
            .resolve(&mut player, &mut enemy, &mut inventory, &mut rng);

        assert_eq!(outcome, FightOutcome::Victory);
        assert_eq!(saved, vec!["Tess".to_string()]);
    }
}
