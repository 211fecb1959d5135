// src/dispatch.rs

//! Route a validated request to exactly one backend operation
//!
//! The match over `Action` is exhaustive, so a registry entry without a
//! dispatch arm cannot compile. `help` is the one pseudo-action: it
//! renders local usage text and never contacts the backend.

use crate::Result;
use crate::context::RequestContext;
use crate::help;
use crate::registry::Action;
use crate::session::Session;

/// Perform the single backend call for the resolved action, passing
/// targets and options through unchanged.
///
/// The operator identity and debug flag reach the backend environment
/// first, for every action, attributed or not.
pub fn dispatch(ctx: &RequestContext, session: &mut Session) -> Result<()> {
    let backend = session.backend_mut();
    backend.push_environment(ctx.admin(), ctx.options.debug);

    match ctx.action.action {
        Action::Install => backend.install(&ctx.targets, &ctx.options),
        Action::Uninstall => backend.uninstall(&ctx.targets, &ctx.options),
        Action::Dequeue => backend.dequeue_pending(&ctx.targets),
        Action::Sync => backend.sync(&ctx.options),
        Action::Freeze => backend.freeze(&ctx.targets),
        Action::Thaw => backend.thaw(&ctx.targets),
        Action::Forget => backend.forget(&ctx.targets),
        Action::ListAvailable => backend.list_available(ctx.options.force),
        Action::ListInstalled => backend.list_installed(),
        Action::ListManual => backend.list_manual(),
        Action::ListPilots => backend.list_pilots(),
        Action::ListFrozen => backend.list_frozen(),
        Action::ListQueue => backend.list_pending_queue(),
        Action::ListDetails => backend.list_details(&ctx.targets),
        Action::ListFiles => backend.list_files(&ctx.targets),
        Action::QueryFiles => backend.query_files(&ctx.targets),
        Action::Help => {
            help::print_usage();
            Ok(())
        }
    }
}
