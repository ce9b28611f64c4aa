use super::registry::ScreenKind;
use super::{Screen, ScreenInput};
use crate::core::context::GameContext;
use crate::core::error::ScreenError;
use crate::core::events::ScreenArg;
use std::collections::HashMap;

/// Flat state machine holding exactly one active screen.
///
/// Screen changes requested through the context outbox are applied after
/// each `enter`, `update` and input dispatch, in request order.
pub struct ScreenMachine<S: Screen = ScreenKind> {
    screens: HashMap<String, S>,
    current: Option<String>,
}

impl<S: Screen> Default for ScreenMachine<S> {
    fn default() -> Self {
        Self {
            screens: HashMap::new(),
            current: None,
        }
    }
}

impl<S: Screen> ScreenMachine<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a screen under `name`, returning the one it replaced.
    pub fn register(&mut self, name: impl Into<String>, screen: S) -> Option<S> {
        let name = name.into();
        let replaced = self.screens.insert(name.clone(), screen);
        if replaced.is_some() {
            tracing::warn!(screen = %name, "screen registered twice; previous entry replaced");
        }
        replaced
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.screens.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.screens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.screens.is_empty()
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&S> {
        self.current.as_ref().and_then(|name| self.screens.get(name))
    }

    pub fn current_mut(&mut self) -> Option<&mut S> {
        let name = self.current.as_ref()?;
        self.screens.get_mut(name)
    }

    pub fn screen(&self, name: &str) -> Option<&S> {
        self.screens.get(name)
    }

    /// Exit the current screen and enter `name`. Re-entering the current
    /// screen runs the full exit/enter cycle.
    ///
    /// Fails without touching the current screen if `name` is unknown.
    pub fn change(
        &mut self,
        ctx: &mut GameContext,
        name: &str,
        arg: Option<ScreenArg>,
    ) -> Result<(), ScreenError> {
        self.switch_to(ctx, name, arg)?;
        self.apply_requests(ctx)
    }

    /// Forward a tick to the current screen.
    pub fn update(&mut self, ctx: &mut GameContext, dt: f64) -> Result<(), ScreenError> {
        if let Some(screen) = self.current_mut() {
            screen.update(ctx, dt);
        }
        self.apply_requests(ctx)
    }

    /// Forward an input to the current screen.
    pub fn handle_input(
        &mut self,
        ctx: &mut GameContext,
        input: ScreenInput,
    ) -> Result<(), ScreenError> {
        if let Some(screen) = self.current_mut() {
            screen.handle_input(ctx, input);
        }
        self.apply_requests(ctx)
    }

    fn switch_to(
        &mut self,
        ctx: &mut GameContext,
        name: &str,
        arg: Option<ScreenArg>,
    ) -> Result<(), ScreenError> {
        if !self.screens.contains_key(name) {
            tracing::error!(screen = name, "change to unregistered screen");
            return Err(ScreenError::UnknownScreen(name.to_string()));
        }

        let previous = self.current.take();
        if let Some(screen) = previous.as_ref().and_then(|p| self.screens.get_mut(p)) {
            screen.exit(ctx);
        }

        tracing::info!(from = ?previous, to = name, "screen change");
        self.current = Some(name.to_string());
        if let Some(screen) = self.screens.get_mut(name) {
            screen.enter(ctx, arg);
        }
        Ok(())
    }

    fn apply_requests(&mut self, ctx: &mut GameContext) -> Result<(), ScreenError> {
        loop {
            let requests = ctx.drain_screen_requests();
            if requests.is_empty() {
                return Ok(());
            }
            for (name, arg) in requests {
                self.switch_to(ctx, &name, arg)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Journal = Rc<RefCell<Vec<String>>>;

    struct Probe {
        name: &'static str,
        journal: Journal,
        redirect_on_enter: Option<&'static str>,
    }

    impl Probe {
        fn new(name: &'static str, journal: &Journal) -> Self {
            Self {
                name,
                journal: journal.clone(),
                redirect_on_enter: None,
            }
        }
    }

    impl Screen for Probe {
        fn enter(&mut self, ctx: &mut GameContext, _arg: Option<ScreenArg>) {
            self.journal.borrow_mut().push(format!("enter {}", self.name));
            if let Some(target) = self.redirect_on_enter {
                ctx.request_screen_change(target, None);
            }
        }

        fn exit(&mut self, _ctx: &mut GameContext) {
            self.journal.borrow_mut().push(format!("exit {}", self.name));
        }
    }

    /// A screen that relies on every default hook.
    struct Inert;
    impl Screen for Inert {}

    #[test]
    fn test_enter_redirect_is_applied() {
        let journal = Journal::default();
        let mut ctx = GameContext::with_seed(1);
        let mut machine = ScreenMachine::new();
        let mut gate = Probe::new("gate", &journal);
        gate.redirect_on_enter = Some("home");
        machine.register("gate", gate);
        machine.register("home", Probe::new("home", &journal));

        machine.change(&mut ctx, "gate", None).unwrap();
        assert_eq!(machine.current_name(), Some("home"));
        assert_eq!(
            *journal.borrow(),
            vec!["enter gate", "exit gate", "enter home"]
        );
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let mut ctx = GameContext::with_seed(1);
        let mut machine: ScreenMachine<Inert> = ScreenMachine::new();
        machine.register("a", Inert);
        machine.register("b", Inert);
        machine.change(&mut ctx, "a", None).unwrap();
        machine.update(&mut ctx, 0.016).unwrap();
        machine
            .handle_input(&mut ctx, ScreenInput::Enter)
            .unwrap();
        machine.change(&mut ctx, "b", None).unwrap();
        assert_eq!(machine.current_name(), Some("b"));
    }

    #[test]
    fn test_register_replaces() {
        let journal = Journal::default();
        let mut machine = ScreenMachine::new();
        assert!(machine.register("a", Probe::new("a", &journal)).is_none());
        assert!(machine.register("a", Probe::new("a2", &journal)).is_some());
        assert_eq!(machine.len(), 1);
    }
}
