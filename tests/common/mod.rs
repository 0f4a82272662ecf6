//! In-memory host used by the integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use host_logger::host::{
    ConfigListener, ConfigurationChange, FileKind, FileStat, HostFileSystem, OutputChannel,
    Subscription,
};
use host_logger::{Host, LoggerError, Result, Severity};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
pub struct ChannelRecord {
    pub name: String,
    pub lines: Vec<(Severity, String)>,
    pub shown: usize,
    pub disposed: usize,
}

pub struct FakeChannel(Arc<Mutex<ChannelRecord>>);

impl OutputChannel for FakeChannel {
    fn error(&mut self, text: &str) {
        self.0.lock().lines.push((Severity::Error, text.to_string()));
    }
    fn warn(&mut self, text: &str) {
        self.0.lock().lines.push((Severity::Warn, text.to_string()));
    }
    fn info(&mut self, text: &str) {
        self.0.lock().lines.push((Severity::Info, text.to_string()));
    }
    fn debug(&mut self, text: &str) {
        self.0.lock().lines.push((Severity::Debug, text.to_string()));
    }
    fn trace(&mut self, text: &str) {
        self.0.lock().lines.push((Severity::Trace, text.to_string()));
    }
    fn show(&mut self) {
        self.0.lock().shown += 1;
    }
    fn dispose(&mut self) {
        self.0.lock().disposed += 1;
    }
}

/// How the host answers a request for an output channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMode {
    Available,
    AsyncOnly,
    Fails,
    Panics,
    Missing,
}

/// How the host answers configuration reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigMode {
    Available,
    Fails,
    Panics,
    Missing,
}

pub enum FsEntry {
    File(Vec<u8>),
    Directory,
    Unreadable,
    StatFails,
}

#[derive(Default)]
pub struct MemoryFs {
    entries: Mutex<HashMap<PathBuf, FsEntry>>,
}

impl MemoryFs {
    pub fn insert(&self, path: impl Into<PathBuf>, entry: FsEntry) {
        self.entries.lock().insert(path.into(), entry);
    }
}

#[async_trait]
impl HostFileSystem for MemoryFs {
    async fn stat(&self, path: &Path) -> io::Result<FileStat> {
        match self.entries.lock().get(path) {
            None => Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
            Some(FsEntry::File(bytes)) => Ok(FileStat {
                kind: FileKind::File,
                size: bytes.len() as u64,
            }),
            Some(FsEntry::Directory) => Ok(FileStat {
                kind: FileKind::Directory,
                size: 0,
            }),
            Some(FsEntry::Unreadable) => Ok(FileStat {
                kind: FileKind::File,
                size: 0,
            }),
            Some(FsEntry::StatFails) => Err(io::Error::new(io::ErrorKind::Other, "stat failed")),
        }
    }

    async fn read_file(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.entries.lock().get(path) {
            Some(FsEntry::File(bytes)) => Ok(bytes.clone()),
            Some(FsEntry::Unreadable) => Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "permission denied",
            )),
            _ => Err(io::Error::new(io::ErrorKind::NotFound, "no such file")),
        }
    }
}

type ListenerTable = Arc<Mutex<Vec<(usize, ConfigListener)>>>;

pub struct FakeSubscription {
    id: usize,
    listeners: ListenerTable,
    disposals: Arc<AtomicUsize>,
}

impl Subscription for FakeSubscription {
    fn dispose(&mut self) {
        self.disposals.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().retain(|(id, _)| *id != self.id);
    }
}

pub struct ChangeEvent {
    changed: Vec<String>,
}

impl ConfigurationChange for ChangeEvent {
    fn affects_configuration(&self, section: &str) -> bool {
        self.changed
            .iter()
            .any(|key| key == section || key.starts_with(&format!("{}.", section)))
    }
}

pub struct FakeHost {
    pub channel_mode: ChannelMode,
    pub config_mode: ConfigMode,
    pub supports_events: bool,
    pub channels: Mutex<Vec<Arc<Mutex<ChannelRecord>>>>,
    settings: Mutex<HashMap<String, String>>,
    listeners: ListenerTable,
    next_listener: AtomicUsize,
    subscriptions: AtomicUsize,
    disposals: Arc<AtomicUsize>,
    pub fs: Option<MemoryFs>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            channel_mode: ChannelMode::Available,
            config_mode: ConfigMode::Available,
            supports_events: true,
            channels: Mutex::new(Vec::new()),
            settings: Mutex::new(HashMap::new()),
            listeners: Arc::new(Mutex::new(Vec::new())),
            next_listener: AtomicUsize::new(0),
            subscriptions: AtomicUsize::new(0),
            disposals: Arc::new(AtomicUsize::new(0)),
            fs: Some(MemoryFs::default()),
        }
    }

    pub fn with_channel_mode(mut self, mode: ChannelMode) -> Self {
        self.channel_mode = mode;
        self
    }

    pub fn with_config_mode(mut self, mode: ConfigMode) -> Self {
        self.config_mode = mode;
        self
    }

    pub fn without_events(mut self) -> Self {
        self.supports_events = false;
        self
    }

    pub fn without_fs(mut self) -> Self {
        self.fs = None;
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn set_setting(&self, section: &str, key: &str, value: &str) {
        self.settings
            .lock()
            .insert(format!("{}.{}", section, key), value.to_string());
    }

    /// Change a setting and notify listeners, as the host would
    pub fn change_setting(&self, section: &str, key: &str, value: &str) {
        self.set_setting(section, key, value);
        self.fire_change(&format!("{}.{}", section, key));
    }

    pub fn fire_change(&self, changed_key: &str) {
        let event = ChangeEvent {
            changed: vec![changed_key.to_string()],
        };
        let listeners: Vec<ConfigListener> = self
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&event);
        }
    }

    pub fn active_listeners(&self) -> usize {
        self.listeners.lock().len()
    }

    pub fn subscriptions_made(&self) -> usize {
        self.subscriptions.load(Ordering::SeqCst)
    }

    pub fn disposals(&self) -> usize {
        self.disposals.load(Ordering::SeqCst)
    }

    pub fn channel(&self, index: usize) -> Arc<Mutex<ChannelRecord>> {
        Arc::clone(&self.channels.lock()[index])
    }

    pub fn channel_count(&self) -> usize {
        self.channels.lock().len()
    }

    pub fn memory_fs(&self) -> &MemoryFs {
        self.fs.as_ref().expect("host has no file system")
    }

    fn open_channel(&self, name: &str) -> Box<dyn OutputChannel> {
        let record = Arc::new(Mutex::new(ChannelRecord {
            name: name.to_string(),
            ..ChannelRecord::default()
        }));
        self.channels.lock().push(Arc::clone(&record));
        Box::new(FakeChannel(record))
    }
}

#[async_trait]
impl Host for FakeHost {
    fn create_output_channel(&self, name: &str) -> Result<Box<dyn OutputChannel>> {
        match self.channel_mode {
            ChannelMode::Available => Ok(self.open_channel(name)),
            ChannelMode::AsyncOnly | ChannelMode::Missing => {
                Err(LoggerError::unsupported("output channel"))
            }
            ChannelMode::Fails => Err(LoggerError::host("creating output channel", "quota")),
            ChannelMode::Panics => panic!("output channel API exploded"),
        }
    }

    async fn create_output_channel_async(&self, name: &str) -> Result<Box<dyn OutputChannel>> {
        match self.channel_mode {
            ChannelMode::AsyncOnly => Ok(self.open_channel(name)),
            _ => self.create_output_channel(name),
        }
    }

    fn get_configuration(&self, section: &str, key: &str) -> Result<Option<String>> {
        match self.config_mode {
            ConfigMode::Available => Ok(self
                .settings
                .lock()
                .get(&format!("{}.{}", section, key))
                .cloned()),
            ConfigMode::Fails => Err(LoggerError::host("reading configuration", "store closed")),
            ConfigMode::Panics => panic!("configuration API exploded"),
            ConfigMode::Missing => Err(LoggerError::unsupported("configuration")),
        }
    }

    fn on_did_change_configuration(
        &self,
        listener: ConfigListener,
    ) -> Result<Box<dyn Subscription>> {
        if !self.supports_events {
            return Err(LoggerError::unsupported("configuration change events"));
        }
        let id = self.next_listener.fetch_add(1, Ordering::SeqCst);
        self.subscriptions.fetch_add(1, Ordering::SeqCst);
        self.listeners.lock().push((id, listener));
        Ok(Box::new(FakeSubscription {
            id,
            listeners: Arc::clone(&self.listeners),
            disposals: Arc::clone(&self.disposals),
        }))
    }

    fn file_system(&self) -> Option<&dyn HostFileSystem> {
        self.fs.as_ref().map(|fs| fs as &dyn HostFileSystem)
    }
}
