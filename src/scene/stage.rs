//! Rendering boundary
//!
//! Scenes describe what they show through [`Stage`]; how it is drawn is up
//! to the implementation. [`HeadlessStage`] keeps everything in memory.

use glam::Vec2;

use super::Signal;

/// Handle to a visual entity created by a [`Stage`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u32);

/// Text appearance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    /// 0xRRGGBB
    pub fill: u32,
    /// Fraction of the text's size the position refers to (0,0 = top-left)
    pub anchor: Vec2,
}

impl TextStyle {
    /// Running score in the top-left corner
    pub const HUD: TextStyle = TextStyle {
        font_size: 20.0,
        fill: 0xffffff,
        anchor: Vec2::ZERO,
    };

    /// Big orange result line, centred horizontally on its position
    pub const HEADLINE: TextStyle = TextStyle {
        font_size: 32.0,
        fill: 0xfcbb08,
        anchor: Vec2::new(0.5, 0.0),
    };
}

/// Everything a stage can be asked to show
#[derive(Debug, Clone, PartialEq)]
pub enum EntityKind {
    /// The ball sprite; pressing it emits `signal`
    Ball { size: f32, signal: Signal },
    Text { text: String, style: TextStyle },
    /// Semi-transparent rectangle with a centred label
    Button {
        label: String,
        size: Vec2,
        color: u32,
        alpha: f32,
        signal: Signal,
    },
}

impl EntityKind {
    /// Signal emitted when the entity is pressed, if it is interactive
    pub fn signal(&self) -> Option<Signal> {
        match self {
            EntityKind::Ball { signal, .. } | EntityKind::Button { signal, .. } => Some(*signal),
            EntityKind::Text { .. } => None,
        }
    }
}

/// Scene container primitives the game needs from a renderer
pub trait Stage {
    fn create_entity(&mut self, kind: EntityKind) -> EntityId;
    fn add_to_scene(&mut self, id: EntityId);
    /// Take the entity off stage and release it. Its id may be handed out
    /// again by a later `create_entity`.
    fn remove_from_scene(&mut self, id: EntityId);
    fn set_text(&mut self, id: EntityId, text: &str);
    fn set_position(&mut self, id: EntityId, pos: Vec2);
}

/// Released entity slots, handed back out lowest id first
#[derive(Debug, Default)]
pub struct FreeSlots {
    /// Sorted descending so `pop` yields the lowest id
    ids: Vec<u32>,
}

impl FreeSlots {
    pub fn release(&mut self, id: EntityId) {
        if let Err(pos) = self.ids.binary_search_by(|other| id.0.cmp(other)) {
            self.ids.insert(pos, id.0);
        }
    }

    pub fn take(&mut self) -> Option<EntityId> {
        self.ids.pop().map(EntityId)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Entity as recorded by [`HeadlessStage`]
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessEntity {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub on_stage: bool,
}

/// In-memory stage for tests and the native build
#[derive(Debug, Default)]
pub struct HeadlessStage {
    slots: Vec<Option<HeadlessEntity>>,
    free: FreeSlots,
}

impl HeadlessStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A live (created and not yet removed) entity
    pub fn entity(&self, id: EntityId) -> Option<&HeadlessEntity> {
        self.slots.get(id.0 as usize).and_then(|slot| slot.as_ref())
    }

    /// Ids of entities currently shown, in id order
    pub fn visible(&self) -> Vec<EntityId> {
        self.live()
            .filter(|(_, e)| e.on_stage)
            .map(|(id, _)| id)
            .collect()
    }

    /// Text of every visible text entity
    pub fn visible_texts(&self) -> Vec<&str> {
        self.live()
            .filter(|(_, e)| e.on_stage)
            .filter_map(|(_, e)| match &e.kind {
                EntityKind::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Slots allocated, live or free
    pub fn slots(&self) -> usize {
        self.slots.len()
    }

    fn live(&self) -> impl Iterator<Item = (EntityId, &HeadlessEntity)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|e| (EntityId(i as u32), e)))
    }

    fn entity_mut(&mut self, id: EntityId) -> Option<&mut HeadlessEntity> {
        let entity = self
            .slots
            .get_mut(id.0 as usize)
            .and_then(|slot| slot.as_mut());
        if entity.is_none() {
            log::warn!("Unknown entity {:?}", id);
        }
        entity
    }
}

impl Stage for HeadlessStage {
    fn create_entity(&mut self, kind: EntityKind) -> EntityId {
        let entity = HeadlessEntity {
            kind,
            pos: Vec2::ZERO,
            on_stage: false,
        };
        match self.free.take() {
            Some(id) => {
                self.slots[id.0 as usize] = Some(entity);
                id
            }
            None => {
                self.slots.push(Some(entity));
                EntityId(self.slots.len() as u32 - 1)
            }
        }
    }

    fn add_to_scene(&mut self, id: EntityId) {
        if let Some(entity) = self.entity_mut(id) {
            entity.on_stage = true;
        }
    }

    fn remove_from_scene(&mut self, id: EntityId) {
        let released = self
            .slots
            .get_mut(id.0 as usize)
            .is_some_and(|slot| slot.take().is_some());
        if released {
            self.free.release(id);
        } else {
            log::warn!("Unknown entity {:?}", id);
        }
    }

    fn set_text(&mut self, id: EntityId, new_text: &str) {
        if let Some(entity) = self.entity_mut(id) {
            match &mut entity.kind {
                EntityKind::Text { text, .. } => {
                    if text != new_text {
                        *text = new_text.to_string();
                    }
                }
                EntityKind::Button { label, .. } => *label = new_text.to_string(),
                EntityKind::Ball { .. } => log::warn!("set_text on ball entity {:?}", id),
            }
        }
    }

    fn set_position(&mut self, id: EntityId, pos: Vec2) {
        if let Some(entity) = self.entity_mut(id) {
            entity.pos = pos;
        }
    }
}
