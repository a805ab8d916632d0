//! Bounce Tap entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement};

    use bounce_tap::Settings;
    use bounce_tap::consts::*;
    use bounce_tap::scene::{EntityId, EntityKind, FreeSlots, SceneMachine, Signal, Stage};

    type Game = Rc<RefCell<SceneMachine<DomStage>>>;

    /// Stage backed by absolutely positioned DOM elements
    struct DomStage {
        document: Document,
        root: Element,
        nodes: Vec<Option<HtmlElement>>,
        free: FreeSlots,
    }

    impl DomStage {
        fn new(document: Document, root: Element) -> Self {
            Self {
                document,
                root,
                nodes: Vec::new(),
                free: FreeSlots::default(),
            }
        }

        fn node(&self, id: EntityId) -> Option<&HtmlElement> {
            self.nodes.get(id.0 as usize).and_then(|n| n.as_ref())
        }

        fn build(&self, kind: &EntityKind) -> Result<HtmlElement, JsValue> {
            let el: HtmlElement = self.document.create_element("div")?.dyn_into()?;
            let style = el.style();
            style.set_property("position", "absolute")?;
            style.set_property("user-select", "none")?;

            match kind {
                EntityKind::Ball { size, .. } => {
                    style.set_property("width", &format!("{size}px"))?;
                    style.set_property("height", &format!("{size}px"))?;
                    style.set_property("border-radius", "50%")?;
                    style.set_property("background", "radial-gradient(circle at 35% 35%, #fff, #f80)")?;
                    style.set_property("cursor", "pointer")?;
                }
                EntityKind::Text { text, style: text_style } => {
                    el.set_text_content(Some(text));
                    style.set_property("font", &format!("{}px Arial", text_style.font_size))?;
                    style.set_property("color", &format!("#{:06x}", text_style.fill))?;
                    style.set_property("text-shadow", "2px 2px #000")?;
                    style.set_property("white-space", "nowrap")?;
                    style.set_property(
                        "transform",
                        &format!(
                            "translate({}%, {}%)",
                            -text_style.anchor.x * 100.0,
                            -text_style.anchor.y * 100.0
                        ),
                    )?;
                }
                EntityKind::Button {
                    label,
                    size,
                    color,
                    alpha,
                    ..
                } => {
                    let color = *color;
                    el.set_text_content(Some(label));
                    style.set_property("width", &format!("{}px", size.x))?;
                    style.set_property("height", &format!("{}px", size.y))?;
                    style.set_property("line-height", &format!("{}px", size.y))?;
                    style.set_property("text-align", "center")?;
                    style.set_property("font", "20px Arial")?;
                    style.set_property("color", "#fff")?;
                    style.set_property("text-shadow", "2px 2px #000")?;
                    style.set_property(
                        "background",
                        &format!(
                            "rgba({}, {}, {}, {alpha})",
                            (color >> 16) & 0xff,
                            (color >> 8) & 0xff,
                            color & 0xff
                        ),
                    )?;
                    style.set_property("cursor", "pointer")?;
                }
            }

            if let Some(signal) = kind.signal() {
                el.set_attribute("data-signal", signal.as_str())?;
            }
            Ok(el)
        }
    }

    impl Stage for DomStage {
        fn create_entity(&mut self, kind: EntityKind) -> EntityId {
            let node = match self.build(&kind) {
                Ok(el) => Some(el),
                Err(e) => {
                    log::error!("Failed to create {:?}: {:?}", kind, e);
                    None
                }
            };
            match self.free.take() {
                Some(id) => {
                    self.nodes[id.0 as usize] = node;
                    id
                }
                None => {
                    self.nodes.push(node);
                    EntityId(self.nodes.len() as u32 - 1)
                }
            }
        }

        fn add_to_scene(&mut self, id: EntityId) {
            if let Some(node) = self.node(id) {
                let _ = self.root.append_child(node);
            }
        }

        fn remove_from_scene(&mut self, id: EntityId) {
            let Some(slot) = self.nodes.get_mut(id.0 as usize) else {
                log::warn!("Unknown entity {:?}", id);
                return;
            };
            if let Some(node) = slot.take() {
                node.remove();
            }
            self.free.release(id);
        }

        fn set_text(&mut self, id: EntityId, text: &str) {
            if let Some(node) = self.node(id) {
                if node.text_content().as_deref() != Some(text) {
                    node.set_text_content(Some(text));
                }
            }
        }

        fn set_position(&mut self, id: EntityId, pos: glam::Vec2) {
            if let Some(node) = self.node(id) {
                let style = node.style();
                let _ = style.set_property("left", &format!("{}px", pos.x));
                let _ = style.set_property("top", &format!("{}px", pos.y));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bounce Tap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let root = match document.get_element_by_id("game") {
            Some(root) => root,
            None => {
                log::warn!("No #game element, drawing into <body>");
                document.body().expect("no body").into()
            }
        };
        if let Ok(root) = root.clone().dyn_into::<HtmlElement>() {
            let style = root.style();
            let _ = style.set_property("position", "relative");
            let _ = style.set_property("overflow", "hidden");
            let _ = style.set_property("width", &format!("{SCREEN_WIDTH}px"));
            let _ = style.set_property("height", &format!("{SCREEN_HEIGHT}px"));
            let _ = style.set_property("background", "#333333");
            let _ = style.set_property("border", "2px dashed black");
        }

        let settings = Settings::load();
        let stage = DomStage::new(document, root.clone());
        let game: Game = Rc::new(RefCell::new(SceneMachine::new(stage, settings)));

        setup_input_handler(&root, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Bounce Tap running!");
    }

    fn setup_input_handler(root: &Element, game: Game) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
            let Some(target) = event
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
            else {
                return;
            };
            let signal = target
                .closest("[data-signal]")
                .ok()
                .flatten()
                .and_then(|el| el.get_attribute("data-signal"))
                .and_then(|name| Signal::from_str(&name));
            let Some(signal) = signal else {
                return;
            };

            event.prevent_default();
            let share = game.borrow_mut().dispatch(signal);
            if let Some(request) = share {
                if let Some(window) = web_sys::window() {
                    if let Err(e) = window.open_with_url(&request.intent_url()) {
                        log::warn!("Could not open share window: {:?}", e);
                    }
                }
            }
        });
        let _ = root
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Game) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Game) {
        game.borrow_mut().advance_frame();
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bounce Tap (native) starting...");
    log::info!("Native mode runs a headless demo round - run with `trunk serve` to play");

    let path = std::env::args().nth(1).map(std::path::PathBuf::from);
    let settings = bounce_tap::Settings::load_from(path.as_deref());
    autoplay(settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one round headlessly: tap the ball whenever it sinks low, ten times
#[cfg(not(target_arch = "wasm32"))]
fn autoplay(settings: bounce_tap::Settings) {
    use bounce_tap::{HeadlessStage, SceneKind, SceneMachine, Signal};

    const TAPS: u32 = 10;
    const TAP_HEIGHT: f32 = 420.0;
    const MAX_FRAMES: u64 = 10_000;

    let mut machine = SceneMachine::new(HeadlessStage::new(), settings);
    machine.dispatch(Signal::Activate);

    while machine.scene_kind() == SceneKind::Playing && machine.frame() < MAX_FRAMES {
        let tap = machine
            .game_state()
            .is_some_and(|s| s.score < TAPS && s.ball.vel.y > 0.0 && s.ball.pos.y > TAP_HEIGHT);
        if tap {
            machine.dispatch(Signal::Activate);
        }
        machine.advance_frame();
    }

    match machine.final_score() {
        Some(score) => {
            println!("Round over after {} frames with score {}", machine.frame(), score);
            if let Some(request) = machine.dispatch(Signal::Share) {
                println!("Share: {}", request.intent_url());
            }
        }
        None => log::warn!("Round still running after {} frames", machine.frame()),
    }
}
