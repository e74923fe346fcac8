use std::collections::BTreeMap;

use super::pack::IconPack;
use super::platform::Platform;

/// Editing state: one icon pack per platform, plus the platform currently
/// being worked on.
///
/// Each platform's pack is created on first selection and survives
/// switching to another platform and back.
#[derive(Clone, Debug)]
pub struct Session {
    packs: BTreeMap<Platform, IconPack>,
    active: Platform,
}

impl Session {
    /// Creates a session with an empty pack for `platform` selected.
    pub fn new(platform: Platform) -> Session {
        let mut packs = BTreeMap::new();
        packs.insert(platform, IconPack::new(platform));
        Session { packs, active: platform }
    }

    /// Returns the selected platform.
    pub fn active_platform(&self) -> Platform {
        self.active
    }

    /// Selects `platform`, creating its pack if needed.
    pub fn select(&mut self, platform: Platform) {
        if platform != self.active {
            tracing::debug!("switching platform from {} to {}", self.active, platform);
        }
        self.packs.entry(platform).or_insert_with(|| IconPack::new(platform));
        self.active = platform;
    }

    /// Returns the pack of the selected platform.
    pub fn active_pack(&self) -> &IconPack {
        &self.packs[&self.active]
    }

    /// Returns the pack of the selected platform, for editing.
    pub fn active_pack_mut(&mut self) -> &mut IconPack {
        let active = self.active;
        self.packs.entry(active).or_insert_with(|| IconPack::new(active))
    }

    /// Returns the pack of `platform`, if it has been selected before.
    pub fn pack(&self, platform: Platform) -> Option<&IconPack> {
        self.packs.get(&platform)
    }

    /// Replaces the selected platform's pack with an empty one.
    pub fn reset(&mut self) {
        tracing::debug!("resetting {} pack", self.active);
        self.packs.insert(self.active, IconPack::new(self.active));
    }
}

impl Default for Session {
    fn default() -> Session {
        Session::new(Platform::Windows)
    }
}
