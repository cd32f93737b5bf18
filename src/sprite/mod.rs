pub mod filter;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crossbeam_channel::{Receiver, Sender};

use crate::error::PetError;

/// Opaque handle for a sprite sheet asset owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u32);

/// Decoded RGBA8 sprite sheet.
#[derive(Debug, Clone)]
pub struct SpriteSheet {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, 4 bytes per pixel.
    pub pixels: Vec<u8>,
}

impl SpriteSheet {
    pub fn new(
        resource: ResourceId,
        width: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, PetError> {
        if pixels.len() != width as usize * height as usize * 4 {
            return Err(PetError::SheetSize {
                resource,
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// Bitmap decoding lives with the host; the engine just asks for pixels.
pub trait SheetLoader: Send + Sync {
    fn load(&self, resource: ResourceId) -> Result<SpriteSheet, PetError>;
}

struct FilterResult {
    generation: u64,
    resource: ResourceId,
    sheet: Result<SpriteSheet, PetError>,
}

/// Resource id → ready-to-sample sheet.
///
/// With the checkerboard filter off, sheets load on first request. With it on,
/// the first request starts a worker thread and returns `None` until a later
/// call picks the filtered sheet up; callers skip drawing that pet meanwhile.
pub struct SpriteCache {
    loader: Arc<dyn SheetLoader>,
    sheets: HashMap<ResourceId, Arc<SpriteSheet>>,
    pending: HashSet<ResourceId>,
    filter_enabled: bool,
    /// Bumped on every filter toggle so late worker results get dropped.
    generation: u64,
    tx: Sender<FilterResult>,
    rx: Receiver<FilterResult>,
}

impl SpriteCache {
    pub fn new(loader: Arc<dyn SheetLoader>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self {
            loader,
            sheets: HashMap::new(),
            pending: HashSet::new(),
            filter_enabled: false,
            generation: 0,
            tx,
            rx,
        }
    }

    pub fn filter_enabled(&self) -> bool {
        self.filter_enabled
    }

    /// Toggle checkerboard removal. Any change drops every cached sheet.
    pub fn set_filter_enabled(&mut self, enabled: bool) {
        if self.filter_enabled == enabled {
            return;
        }
        self.filter_enabled = enabled;
        self.generation += 1;
        self.sheets.clear();
        self.pending.clear();
        log::info!(
            "Checkerboard filter {}, sprite cache cleared",
            if enabled { "enabled" } else { "disabled" }
        );
    }

    pub fn is_pending(&self, resource: ResourceId) -> bool {
        self.pending.contains(&resource)
    }

    /// Collect finished worker results. Returns how many sheets became ready.
    pub fn poll(&mut self) -> usize {
        let mut ready = 0;
        while let Ok(result) = self.rx.try_recv() {
            if result.generation != self.generation {
                continue;
            }
            self.pending.remove(&result.resource);
            match result.sheet {
                Ok(sheet) => {
                    self.sheets.insert(result.resource, Arc::new(sheet));
                    ready += 1;
                }
                Err(e) => log::warn!("{e}"),
            }
        }
        ready
    }

    /// Sheet for `resource`, or `None` while it is not ready (or failed to load).
    pub fn get(&mut self, resource: ResourceId) -> Option<Arc<SpriteSheet>> {
        self.poll();
        if let Some(sheet) = self.sheets.get(&resource) {
            return Some(sheet.clone());
        }

        if !self.filter_enabled {
            return match self.loader.load(resource) {
                Ok(sheet) => {
                    let sheet = Arc::new(sheet);
                    self.sheets.insert(resource, sheet.clone());
                    Some(sheet)
                }
                Err(e) => {
                    log::warn!("{e}");
                    None
                }
            };
        }

        if self.pending.insert(resource) {
            self.spawn_filter_job(resource);
        }
        None
    }

    fn spawn_filter_job(&mut self, resource: ResourceId) {
        let loader = self.loader.clone();
        let tx = self.tx.clone();
        let generation = self.generation;
        let spawned = std::thread::Builder::new()
            .name("sprite-filter".into())
            .spawn(move || {
                let sheet = loader.load(resource).map(|mut sheet| {
                    filter::remove_checkerboard(&mut sheet);
                    sheet
                });
                // Receiver gone means the cache was dropped; nothing to do.
                let _ = tx.send(FilterResult {
                    generation,
                    resource,
                    sheet,
                });
            });
        if let Err(e) = spawned {
            log::warn!("Could not start sprite filter worker for {resource:?}: {e}");
            self.pending.remove(&resource);
        }
    }
}
