use galaxy::{Galaxy, HexCoord};
use std::collections::HashSet;
use units::{Technology, Unit};

/// Everything a movement rule may inspect.
///
/// The path, when present, lists the coordinates of every system the unit
/// passes, endpoints included. The active system is the one activated by the
/// running tactical action; single operations validated outside an action
/// leave it unset.
pub struct MovementContext<'a> {
    pub unit: &'a Unit,
    pub from: HexCoord,
    pub to: HexCoord,
    pub technologies: &'a HashSet<Technology>,
    pub galaxy: &'a Galaxy,
    pub path: Option<&'a [HexCoord]>,
    pub active_system: Option<HexCoord>,
}

impl<'a> MovementContext<'a> {
    /// Coordinates the unit traverses: the explicit path, or just the
    /// endpoints when no path was resolved.
    pub fn traversal(&self) -> Vec<HexCoord> {
        match self.path {
            Some(path) => path.to_vec(),
            None => vec![self.from, self.to],
        }
    }
}
