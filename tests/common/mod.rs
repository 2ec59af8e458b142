//! Common test utilities - VaultTest harness for command scenarios

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use parking_lot::Mutex;
use tempfile::NamedTempFile;

use worldvault::host::{CommandSender, MemoryHost};
use worldvault::inventory::{Inventory, ItemStack, Material};
use worldvault::{Config, Engine};

/// Test harness assembling an engine on an in-memory database with a
/// mutable player roster and a message-recording sender
pub struct VaultTest {
    pub engine: Engine,
    pub host: Arc<MemoryHost>,
    pub sender: RecordingSender,
    // Keeps the temp settings file alive for the engine's lifetime
    _settings: Option<NamedTempFile>,
}

impl VaultTest {
    /// Start with built-in default settings
    pub async fn start() -> Result<Self> {
        Self::with_settings(None).await
    }

    /// Start with the given settings TOML written to a temp file
    pub async fn with_settings(toml: Option<&str>) -> Result<Self> {
        let settings = match toml {
            Some(content) => {
                let mut file = NamedTempFile::new()?;
                write!(file, "{}", content)?;
                Some(file)
            }
            None => None,
        };

        let host = Arc::new(MemoryHost::new());
        let config = Config {
            db_path: None,
            settings_path: settings.as_ref().map(|f| f.path().to_path_buf()),
        };
        let engine = Engine::new(config, host.clone()).await?;

        Ok(Self {
            engine,
            host,
            sender: RecordingSender::new(),
            _settings: settings,
        })
    }

    /// Issue a command through the host callback
    pub async fn command(&self, root: &str, args: &[&str]) -> bool {
        self.engine.on_command(&self.sender, root, "", args).await
    }
}

/// Command sender that records every message for assertions
#[derive(Clone, Default)]
pub struct RecordingSender {
    messages: Arc<Mutex<Vec<String>>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.messages.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl CommandSender for RecordingSender {
    fn name(&self) -> &str {
        "tester"
    }

    fn send_message(&self, message: &str) {
        self.messages.lock().push(message.to_string());
    }
}

/// Fixed five-item inventory used by the migration scenarios
pub fn filler_inventory() -> Inventory {
    let mut inv = Inventory::new();

    let mut book = ItemStack::new(Material::WrittenBook, 1);
    book.set_meta("title", serde_json::json!("Well Worn Journal"));
    inv.set_item(1, book);

    inv.set_item(2, ItemStack::new(Material::LeatherBoots, 1));
    inv.set_item(3, ItemStack::new(Material::Bow, 1));
    inv.set_item(13, ItemStack::new(Material::Dirt, 64));
    inv.set_item(36, ItemStack::new(Material::IronHelmet, 1));
    inv
}
