use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use log::{info, warn};
use spin_shared::{
    ConfigError, ConfigStore, ContextMenu, EditorTab, MenuAction, MenuOption, PendingSpin,
    SessionGate, SpinButton, SpinController, SpinReveal, UserSession, WheelConfig,
};
use yew::prelude::*;

use crate::storage::BrowserStorage;

struct WheelState {
    store: ConfigStore<BrowserStorage>,
    gate: SessionGate<BrowserStorage>,
    spins: SpinController,
    config: WheelConfig,
    menu: Option<ContextMenu>,
    editor_tab: EditorTab,
    message: Option<String>,
}

impl WheelState {
    fn restore() -> Self {
        let storage = BrowserStorage::local();
        let store = ConfigStore::new(storage.clone());
        let config = store.load();
        Self {
            store,
            gate: SessionGate::new(storage),
            spins: SpinController::new(),
            config,
            menu: None,
            editor_tab: EditorTab::default(),
            message: None,
        }
    }

    // Saves a draft. Outside admin mode the edit is dropped quietly and the
    // editing UI should disappear, since `is_admin` is now false.
    fn save(&mut self, draft: WheelConfig) -> bool {
        match self.store.save(self.gate.authority(), &draft) {
            Ok(saved) => {
                self.config = saved;
                self.message = None;
                true
            }
            Err(ConfigError::PermissionDenied) => {
                warn!("Ignored wheel edit outside admin mode");
                self.menu = None;
                false
            }
            Err(e) => {
                self.message = Some(e.to_string());
                false
            }
        }
    }
}

/// Everything the wheel's view needs: current config and session, plus the
/// actions a member or admin can take. Clones share state.
#[derive(Clone)]
pub struct PrizeWheelHandle {
    state: Rc<RefCell<WheelState>>,
    timer: Rc<RefCell<Option<Timeout>>>,
    refresh: UseForceUpdateHandle,
}

impl PrizeWheelHandle {
    pub fn config(&self) -> WheelConfig {
        self.state.borrow().config.clone()
    }

    pub fn session(&self) -> Option<UserSession> {
        self.state.borrow().spins.session().cloned()
    }

    pub fn is_admin(&self) -> bool {
        self.state.borrow().gate.is_admin()
    }

    pub fn button(&self) -> SpinButton {
        let state = self.state.borrow();
        state.spins.button(&state.config)
    }

    /// The spin being animated, so the wheel knows where to stop
    pub fn pending(&self) -> Option<PendingSpin> {
        self.state.borrow().spins.pending().cloned()
    }

    pub fn reveal(&self) -> Option<SpinReveal> {
        self.state.borrow().spins.last_reveal().cloned()
    }

    pub fn message(&self) -> Option<String> {
        self.state.borrow().message.clone()
    }

    pub fn context_menu(&self) -> Option<ContextMenu> {
        self.state.borrow().menu.clone()
    }

    pub fn editor_tab(&self) -> EditorTab {
        self.state.borrow().editor_tab
    }

    pub fn login(&self, email: &str) -> bool {
        let ok = {
            let mut state = self.state.borrow_mut();
            match state.gate.login(email) {
                Ok(session) => {
                    info!("Member signed in: {}", session.email);
                    state.spins.begin_session(session);
                    state.message = None;
                    true
                }
                Err(e) => {
                    state.message = Some(e.to_string());
                    false
                }
            }
        };
        self.cancel_timer();
        self.refresh.force_update();
        ok
    }

    pub fn login_as_admin(&self, credential: &str) -> bool {
        let ok = self.state.borrow_mut().gate.login_as_admin(credential);
        self.refresh.force_update();
        ok
    }

    pub fn logout(&self) {
        self.cancel_timer();
        {
            let mut state = self.state.borrow_mut();
            state.spins.logout();
            state.menu = None;
        }
        self.refresh.force_update();
    }

    pub fn logout_admin(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.gate.logout_admin();
            state.menu = None;
        }
        self.refresh.force_update();
    }

    /// Picks the winner now and reveals it once the animation has run.
    pub fn spin(&self) {
        let started = {
            let mut state = self.state.borrow_mut();
            let WheelState { spins, config, .. } = &mut *state;
            match spins.start_spin_with_rng(config, &mut rand::thread_rng()) {
                Ok(pending) => Some(pending),
                Err(e) => {
                    state.message = Some(e.to_string());
                    None
                }
            }
        };

        if let Some(pending) = started {
            let state = self.state.clone();
            let refresh = self.refresh.clone();
            let ticket = pending.ticket;
            let millis = pending.animation.as_millis().min(u32::MAX as u128) as u32;

            let timeout = Timeout::new(millis, move || {
                {
                    let mut state = state.borrow_mut();
                    let WheelState { spins, gate, .. } = &mut *state;
                    if let Err(e) = spins.finish_spin(gate, ticket) {
                        warn!("Spin not revealed: {}", e);
                    }
                }
                refresh.force_update();
            });
            // replacing an old timer cancels it
            *self.timer.borrow_mut() = Some(timeout);
        }
        self.refresh.force_update();
    }

    /// Applies an admin edit and persists it.
    pub fn update_config<F>(&self, edit: F) -> bool
    where
        F: FnOnce(&mut WheelConfig) -> Result<(), ConfigError>,
    {
        let ok = {
            let mut state = self.state.borrow_mut();
            let mut draft = state.config.clone();
            match edit(&mut draft) {
                Ok(()) => state.save(draft),
                Err(e) => {
                    state.message = Some(e.to_string());
                    false
                }
            }
        };
        self.refresh.force_update();
        ok
    }

    pub fn export_config(&self) -> Option<String> {
        let state = self.state.borrow();
        state.store.export(&state.config).ok()
    }

    pub fn import_config(&self, raw: &str) -> bool {
        let ok = {
            let mut state = self.state.borrow_mut();
            let result = state.store.import(state.gate.authority(), raw);
            match result {
                Ok(config) => {
                    state.config = config;
                    state.message = None;
                    true
                }
                Err(e) => {
                    state.message = Some(e.to_string());
                    false
                }
            }
        };
        self.refresh.force_update();
        ok
    }

    /// Does nothing outside admin mode.
    pub fn open_context_menu(&self, x: i32, y: i32, options: Vec<MenuOption>) {
        let menu = self.state.borrow().gate.authority().open_context_menu(x, y, options);
        if menu.is_some() {
            self.state.borrow_mut().menu = menu;
            self.refresh.force_update();
        }
    }

    pub fn close_context_menu(&self) {
        self.state.borrow_mut().menu = None;
        self.refresh.force_update();
    }

    pub fn choose_menu_action(&self, action: &MenuAction) {
        {
            let mut state = self.state.borrow_mut();
            state.menu = None;
            if state.gate.is_admin() {
                let mut draft = state.config.clone();
                match action.apply(&mut draft) {
                    Ok(tab) => {
                        if draft != state.config {
                            state.save(draft);
                        }
                        if let Some(tab) = tab {
                            state.editor_tab = tab;
                        }
                    }
                    Err(e) => state.message = Some(e.to_string()),
                }
            }
        }
        self.refresh.force_update();
    }

    pub fn set_editor_tab(&self, tab: EditorTab) {
        self.state.borrow_mut().editor_tab = tab;
        self.refresh.force_update();
    }

    // Dropping the timer only saves a wasted callback. A reveal that still
    // fires after logout or re-login hits `StaleSpin` in `finish_spin`.
    fn cancel_timer(&self) {
        self.timer.borrow_mut().take();
    }
}

#[hook]
pub fn use_prize_wheel() -> PrizeWheelHandle {
    let state = use_mut_ref(WheelState::restore);
    let timer = use_mut_ref(|| None::<Timeout>);
    let refresh = use_force_update();

    {
        let timer = timer.clone();
        use_effect_with((), move |_| {
            move || {
                timer.borrow_mut().take();
            }
        });
    }

    PrizeWheelHandle { state, timer, refresh }
}
