#![forbid(unsafe_code)]

//! Lifecycle controller: mount, update, unmount.
//!
//! One `ViewController` owns one engine view for one mount. Mount builds
//! the view from the spec/config pair, sizes it against the container,
//! applies optional styling, binds the handler tables, and triggers the
//! first render. Updates react to the two watched attributes (visibility,
//! aspect ratio) by latching a resize pass. Unmount unbinds, finalizes,
//! and cancels the scheduler so nothing touches the released view.
//!
//! # State machine
//!
//! ```text
//! Created ──mount──▶ Mounted ──unmount──▶ Unmounting ──▶ Unmounted
//! ```
//!
//! `Unmounted` is terminal; a controller is never remounted.
//!
//! # Invariants
//!
//! 1. Exactly one engine view is constructed per successful mount, and it
//!    is finalized exactly once, at the first unmount.
//! 2. Handler tables bound at mount are unbound with identical pairings
//!    at unmount.
//! 3. No render or sizing call reaches the view once unmount has begun.
//! 4. At most one resize subscription exists per controller, held only
//!    while interactive.
//!
//! # Failure Modes
//!
//! - Missing spec at mount: [`LifecycleError::MissingSpec`], mount
//!   aborted before any view exists.
//! - Engine parse/render failures: propagated untouched.
//! - Unmount without a handle, guarded render passes, unmeasurable
//!   containers: silent no-ops, these are expected phase races.

use std::rc::Rc;

use tracing::{debug, trace, warn};
use vismount_core::clock::Clock;
use vismount_core::container::Container;
use vismount_core::diff::WatchedChanges;
use vismount_core::dimensions::compute_size;
use vismount_core::env::RenderEnvironment;
use vismount_core::error::LifecycleError;
use vismount_core::props::ViewProps;
use vismount_core::spec_doc;

use crate::binder::{self, ListenerChannel};
use crate::engine::{EncodeSet, Engine};
use crate::handle::ViewHandle;
use crate::scheduler::ResizeScheduler;
use crate::signal::{ResizeSignal, ResizeSubscription};

/// Lifecycle phase of a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Constructed, not yet mounted.
    Created,
    /// Mounted and live.
    Mounted,
    /// Unmount in progress; render passes are refused.
    Unmounting,
    /// Unmounted. Terminal.
    Unmounted,
}

/// Binds one view lifecycle to one container.
pub struct ViewController<E: Engine> {
    engine: E,
    env: Rc<dyn RenderEnvironment>,
    resize_signal: ResizeSignal,
    props: ViewProps,
    scheduler: ResizeScheduler,
    phase: LifecyclePhase,
    container: Option<Rc<dyn Container>>,
    handle: Option<ViewHandle<E::View>>,
    resize_sub: Option<ResizeSubscription>,
}

impl<E: Engine> ViewController<E> {
    /// Controller on the real clock.
    pub fn new(
        engine: E,
        env: Rc<dyn RenderEnvironment>,
        resize_signal: ResizeSignal,
        props: ViewProps,
    ) -> Self {
        Self::with_clock(engine, env, resize_signal, props, Clock::default())
    }

    /// Controller on an explicit clock (manual in tests).
    pub fn with_clock(
        engine: E,
        env: Rc<dyn RenderEnvironment>,
        resize_signal: ResizeSignal,
        props: ViewProps,
        clock: Clock,
    ) -> Self {
        Self {
            engine,
            env,
            resize_signal,
            props,
            scheduler: ResizeScheduler::new(clock),
            phase: LifecyclePhase::Created,
            container: None,
            handle: None,
            resize_sub: None,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// The stored props.
    #[must_use]
    pub fn props(&self) -> &ViewProps {
        &self.props
    }

    /// The live view handle, while mounted.
    #[must_use]
    pub fn handle(&self) -> Option<&ViewHandle<E::View>> {
        self.handle.as_ref()
    }

    /// Bind the view to `container` and bring it live. Called exactly
    /// once per controller.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::MissingSpec`] when no spec was supplied; engine
    /// rejections as [`LifecycleError::Engine`]. Either way no view is
    /// left behind, and a later [`unmount`](Self::unmount) (or dropping
    /// the controller) releases the resize subscription.
    pub fn mount(&mut self, container: Rc<dyn Container>) -> Result<(), LifecycleError> {
        debug_assert!(
            self.phase == LifecyclePhase::Created,
            "mount is once per controller"
        );
        if self.phase != LifecyclePhase::Created {
            return Ok(());
        }

        let interactive = !self.env.is_non_interactive();
        if interactive {
            let scheduler = self.scheduler.clone();
            self.resize_sub = Some(self.resize_signal.subscribe(move || scheduler.poke()));
        }

        let Some(mut spec) = self.props.spec.take() else {
            warn!("mount aborted: no specification supplied");
            return Err(LifecycleError::MissingSpec);
        };
        spec_doc::merge_external_data(&mut spec, self.props.data.as_ref());

        let construction = ViewHandle::construct(&self.engine, &spec, self.props.config.as_ref());
        // The spec owns the merged result either way.
        self.props.spec = Some(spec);
        let mut handle = construction.map_err(LifecycleError::Engine)?;

        if interactive {
            handle.initialize(container.as_ref());
        }

        if let Some(size) = compute_size(container.as_ref(), self.props.aspect_ratio) {
            handle.apply_size(size);
        } else {
            trace!("container not yet measurable; initial sizing skipped");
        }

        if let Some(padding) = &self.props.padding {
            handle.set_padding(padding);
        }
        if let Some(background) = &self.props.background {
            handle.set_background(background);
        }
        handle.set_log_level(self.props.log_level);
        handle.set_renderer(self.props.renderer);
        handle.enable_hover();

        self.container = Some(container);
        self.handle = Some(handle);
        self.phase = LifecyclePhase::Mounted;

        self.run_view(None)?;

        binder::bind(
            self.handle.as_mut(),
            ListenerChannel::Interaction,
            &self.props.events,
        );
        binder::bind(
            self.handle.as_mut(),
            ListenerChannel::Signal,
            &self.props.signal_events,
        );

        debug!(interactive, "view mounted");
        Ok(())
    }

    /// React to a host-reported change of the watched attributes.
    ///
    /// Becoming explicitly visible, or any aspect-ratio change, latches a
    /// resize pass: a container that was hidden (or re-proportioned) may
    /// hold a stale size. All other transitions are ignored.
    pub fn notify_attrs(&mut self, changes: &WatchedChanges) {
        if self.phase != LifecyclePhase::Mounted {
            return;
        }

        if let Some(change) = changes.is_visible {
            self.props.is_visible = change.new;
            if change.new == Some(true) && change.differs() {
                trace!("became visible; resize pass latched");
                self.scheduler.schedule_pass();
            }
        }

        if let Some(change) = changes.aspect_ratio {
            self.props.aspect_ratio = change.new;
            if change.differs() {
                trace!(
                    old = ?change.old,
                    new = ?change.new,
                    "aspect ratio changed; resize pass latched"
                );
                self.scheduler.schedule_pass();
            }
        }
    }

    /// Notify the controller that a render cycle completed.
    ///
    /// Drives the resize scheduler and executes a due resize pass:
    /// re-measure, re-apply, and re-run only the entering encode set.
    pub fn after_render(&mut self) -> Result<(), LifecycleError> {
        if self.scheduler.advance() {
            self.resize_pass()
        } else {
            Ok(())
        }
    }

    fn resize_pass(&mut self) -> Result<(), LifecycleError> {
        if !self.props.effectively_visible() || !self.props.effectively_resizable() {
            return Ok(());
        }
        if self.handle.is_none() {
            return Ok(());
        }
        let Some(container) = self.container.clone() else {
            return Ok(());
        };
        let Some(size) = compute_size(container.as_ref(), self.props.aspect_ratio) else {
            trace!("container unmeasurable; resize pass skipped");
            return Ok(());
        };
        if let Some(handle) = self.handle.as_mut() {
            handle.apply_size(size);
        }
        self.run_view(Some(EncodeSet::Enter))
    }

    /// Guarded render: skipped while unmounting/unmounted, while the
    /// component is explicitly hidden, or when no handle exists.
    fn run_view(&mut self, encode: Option<EncodeSet>) -> Result<(), LifecycleError> {
        let destroying = matches!(
            self.phase,
            LifecyclePhase::Unmounting | LifecyclePhase::Unmounted
        );
        if destroying || !self.props.effectively_visible() {
            return Ok(());
        }
        let Some(handle) = self.handle.as_mut() else {
            return Ok(());
        };
        handle.run(encode).map_err(LifecycleError::Engine)
    }

    /// Tear down the mounted view. Idempotent; safe to call before mount
    /// or repeatedly.
    ///
    /// Order matters: the resize subscription and both scheduler stages
    /// are cancelled first, then the handler tables are unbound with the
    /// currently stored tables, then the handle is finalized and dropped.
    pub fn unmount(&mut self) {
        self.resize_sub = None;
        self.scheduler.cancel();

        if let Some(mut handle) = self.handle.take() {
            self.phase = LifecyclePhase::Unmounting;
            binder::unbind(
                Some(&mut handle),
                ListenerChannel::Interaction,
                &self.props.events,
            );
            binder::unbind(
                Some(&mut handle),
                ListenerChannel::Signal,
                &self.props.signal_events,
            );
            handle.finalize();
            debug!("view finalized");
        }

        self.container = None;
        self.phase = LifecyclePhase::Unmounted;
    }
}

impl<E: Engine> Drop for ViewController<E> {
    fn drop(&mut self) {
        // A controller dropped while mounted must not leak the view or
        // its listeners.
        if self.handle.is_some() {
            self.unmount();
        }
    }
}
