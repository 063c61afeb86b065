//! Spawn-point coordinates, loaded from per-region JSON sidecars keyed
//! by `"area-lottery-spawn"`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::types::RaidMap;

type CoordMap = HashMap<String, [f32; 3]>;

/// Coordinate tables for the three Gen9 regions. Missing files and
/// missing keys both degrade to "no coordinate" rather than an error;
/// a raid is still worth listing without a map pin.
#[derive(Debug, Default)]
pub struct LocationData {
    paldea: CoordMap,
    kitakami: CoordMap,
    blueberry: CoordMap,
}

impl LocationData {
    pub fn load(paldea: &Path, kitakami: &Path, blueberry: &Path) -> Self {
        Self {
            paldea: Self::load_map(paldea),
            kitakami: Self::load_map(kitakami),
            blueberry: Self::load_map(blueberry),
        }
    }

    fn load_map(path: &Path) -> CoordMap {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) => {
                log::warn!("no coordinate sidecar at {:?}: {}", path, e);
                return CoordMap::new();
            }
        };
        match serde_json::from_str::<CoordMap>(&data) {
            Ok(map) => {
                log::info!("loaded {} spawn coordinates from {:?}", map.len(), path);
                map
            }
            Err(e) => {
                log::warn!("unparseable coordinate sidecar {:?}: {}", path, e);
                CoordMap::new()
            }
        }
    }

    #[cfg(test)]
    pub fn from_maps(paldea: CoordMap, kitakami: CoordMap, blueberry: CoordMap) -> Self {
        Self {
            paldea,
            kitakami,
            blueberry,
        }
    }

    fn map_for(&self, map: RaidMap) -> &CoordMap {
        match map {
            RaidMap::Paldea => &self.paldea,
            RaidMap::Kitakami => &self.kitakami,
            RaidMap::Blueberry => &self.blueberry,
        }
    }

    pub fn key(area_id: u32, lottery_group: u32, spawn_point_id: u32) -> String {
        format!("{}-{}-{}", area_id, lottery_group, spawn_point_id)
    }

    pub fn coord(
        &self,
        map: RaidMap,
        area_id: u32,
        lottery_group: u32,
        spawn_point_id: u32,
    ) -> Option<[f32; 3]> {
        self.map_for(map)
            .get(&Self::key(area_id, lottery_group, spawn_point_id))
            .copied()
    }

    /// Min/max X and Z over a region's spawn points, padded by 5% for
    /// map rendering. `None` when the region has no coordinates.
    pub fn bounds(&self, map: RaidMap) -> Option<(f32, f32, f32, f32)> {
        let coords = self.map_for(map);
        if coords.is_empty() {
            return None;
        }
        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        let mut min_z = f32::MAX;
        let mut max_z = f32::MIN;
        for coord in coords.values() {
            min_x = min_x.min(coord[0]);
            max_x = max_x.max(coord[0]);
            min_z = min_z.min(coord[2]);
            max_z = max_z.max(coord[2]);
        }
        let pad_x = (max_x - min_x) * 0.05;
        let pad_z = (max_z - min_z) * 0.05;
        Some((min_x - pad_x, max_x + pad_x, min_z - pad_z, max_z + pad_z))
    }
}
