// src/save/src/lib.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Context;
use character::{Character, Inventory};
use chrono::{DateTime, Local};
use error::GameError;
use items::Item;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// 当前存档格式版本
pub const SAVE_VERSION: u32 = 3;
/// 每个角色保留的自动存档数量
const AUTOSAVES_PER_PLAYER: usize = 3;
const AUTO_PREFIX: &str = "AUTO -";

fn default_version() -> u32 {
    1
}

/// 存档数据：版本号 + 玩家 + 序列化的背包条目
///
/// 背包条目以带 `type` 判别字段的 JSON 记录存放，逐条解码，
/// 单条损坏不拖垮整个存档。
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveData {
    #[serde(default = "default_version")]
    pub version: u32,
    pub player: Character,
    #[serde(default)]
    pub inventory_items: Vec<Value>,
    #[serde(default)]
    pub location: Option<String>,
    pub save_time: DateTime<Local>,
}

impl SaveData {
    /// 把旧版本存档逐级升到当前版本；对已是当前版本的存档无副作用
    pub fn migrate(&mut self) {
        if self.version < 2 {
            self.version = 2;
        }
        if self.version < 3 {
            // v3 introduced the location field
            self.location.get_or_insert_with(|| "Unknown".to_string());
            self.version = 3;
        }
    }
}

/// 物品记录编码：正常序列化后注入 `type` 判别字段
pub fn encode_item(item: &Item) -> Value {
    match serde_json::to_value(item) {
        Ok(Value::Object(mut obj)) => {
            obj.insert("type".to_string(), json!(item.type_label()));
            Value::Object(obj)
        }
        // degraded record still carries enough to identify the item
        _ => json!({ "type": item.type_label(), "name": item.name }),
    }
}

/// 按 `type` 判别字段解码一条物品记录
pub fn decode_item(value: &Value) -> Result<Item, GameError> {
    let obj = value
        .as_object()
        .ok_or_else(|| GameError::DeserializationError("item record is not an object".into()))?;

    let label = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| GameError::DeserializationError("item record missing type".into()))?;

    const KNOWN: &[&str] = &[
        "Weapon",
        "ArmorPiece",
        "Potion",
        "Artifact",
        "Material",
        "QuestItem",
        "Gold",
    ];
    if !KNOWN.contains(&label) {
        return Err(GameError::UnknownItemType(label.to_string()));
    }

    let mut record = obj.clone();
    record.remove("type");
    let item: Item = serde_json::from_value(Value::Object(record))
        .map_err(|e| GameError::DeserializationError(e.to_string()))?;
    Ok(item)
}

/// 载入结果：迁移后的存档数据加上重建好的背包
#[derive(Debug)]
pub struct LoadedGame {
    pub data: SaveData,
    pub inventory: Inventory,
}

/// 存档系统：目录下一文件一存档，文件名携带角色与时间戳
pub struct SaveSystem {
    save_dir: PathBuf,
}

impl SaveSystem {
    pub fn new(save_dir: impl AsRef<Path>) -> Result<Self, GameError> {
        let save_dir = save_dir.as_ref();
        if !save_dir.exists() {
            fs::create_dir_all(save_dir).context("Failed to create save directory")?;
        }
        Ok(Self {
            save_dir: save_dir.to_path_buf(),
        })
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    /// 写出一个存档，返回存档名（不含扩展名）
    pub fn save_game(
        &self,
        player: &Character,
        inventory: &Inventory,
        is_auto: bool,
    ) -> Result<String, GameError> {
        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let raw_name = if is_auto {
            format!("AUTO - {} ({}) - {}", player.name, player.class, timestamp)
        } else {
            format!("{} ({}) - {}", player.name, player.class, timestamp)
        };
        let safe_name = sanitize_file_name(&raw_name);
        let path = self.save_dir.join(format!("{safe_name}.json"));

        let data = SaveData {
            version: SAVE_VERSION,
            player: player.clone(),
            inventory_items: inventory.items().iter().map(encode_item).collect(),
            location: Some("Unknown".to_string()),
            save_time: Local::now(),
        };

        let json = serde_json::to_string_pretty(&data)
            .map_err(|e| GameError::SerializationError(e.to_string()))?;
        fs::write(&path, json).context("Failed to write save file")?;

        if is_auto {
            self.prune_autosaves(&player.name)?;
        }
        Ok(safe_name)
    }

    /// 读取一个存档并重建背包
    ///
    /// 整档解析失败是致命错误；单条物品记录解码失败只丢弃那一条。
    pub fn load_game(&self, name: &str) -> Result<LoadedGame, GameError> {
        let path = self.save_dir.join(format!("{name}.json"));
        let json = fs::read_to_string(&path).context("Failed to read save file")?;

        let mut data: SaveData = serde_json::from_str(&json)?;
        if data.version > SAVE_VERSION {
            return Err(GameError::UnsupportedVersion(data.version));
        }
        data.migrate();

        let mut inventory = Inventory::new();
        for record in &data.inventory_items {
            match decode_item(record) {
                Ok(item) => inventory.add(item),
                Err(_) => continue,
            }
        }

        Ok(LoadedGame { data, inventory })
    }

    /// 所有存档名，按最近修改时间从新到旧
    pub fn list_saves(&self) -> Result<Vec<String>, GameError> {
        let mut files = self.save_files()?;
        files.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
        Ok(files.into_iter().map(|(name, _)| name).collect())
    }

    pub fn autosaves(&self) -> Result<Vec<String>, GameError> {
        Ok(self
            .list_saves()?
            .into_iter()
            .filter(|n| n.starts_with(AUTO_PREFIX))
            .collect())
    }

    pub fn manual_saves(&self) -> Result<Vec<String>, GameError> {
        Ok(self
            .list_saves()?
            .into_iter()
            .filter(|n| !n.starts_with(AUTO_PREFIX))
            .collect())
    }

    /// 每个角色只保留最新的三份自动存档
    ///
    /// 归属角色靠重新解析文件内容判断，文件名里的名字可能被清洗过。
    pub fn prune_autosaves(&self, player_name: &str) -> Result<(), GameError> {
        let stale: Vec<String> = self
            .autosaves()?
            .into_iter()
            .filter(|name| {
                let path = self.save_dir.join(format!("{name}.json"));
                fs::read_to_string(&path)
                    .ok()
                    .and_then(|json| serde_json::from_str::<SaveData>(&json).ok())
                    .is_some_and(|data| data.player.name == player_name)
            })
            .skip(AUTOSAVES_PER_PLAYER)
            .collect();

        for name in stale {
            let path = self.save_dir.join(format!("{name}.json"));
            fs::remove_file(&path).context("Failed to delete stale autosave")?;
        }
        Ok(())
    }

    /// 删除一个存档；不存在返回 false
    pub fn delete_save(&self, name: &str) -> Result<bool, GameError> {
        let path = self.save_dir.join(format!("{name}.json"));
        if !path.exists() {
            return Ok(false);
        }
        fs::remove_file(&path).context("Failed to delete save file")?;
        Ok(true)
    }

    fn save_files(&self) -> Result<Vec<(String, SystemTime)>, GameError> {
        let mut files = Vec::new();
        let entries = fs::read_dir(&self.save_dir).context("Failed to read save directory")?;

        for entry in entries {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let modified = entry
                .metadata()
                .and_then(|m| m.modified())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            files.push((stem.to_string(), modified));
        }
        Ok(files)
    }
}

/// 文件名清洗：路径分隔符和其它不安全字符替换为 '-'
fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}
