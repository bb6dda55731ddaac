use std::time::Instant;

use indexmap::map::Iter;
use tracing::{debug, info};

use super::selector::ModuleSelection;
use crate::Result;
use crate::model::{
    AnnouncementTable, ArgumentTable, CommandGroupInfo, CommandInfo, LoadedCommands,
    ModuleCommands,
};
use crate::traits::CommandLoader;

/// One node of the loaded command tree that may carry breaking changes.
#[derive(Debug)]
pub enum WalkEntry<'a> {
    Core {
        announcements: &'a AnnouncementTable,
    },
    Command {
        module: &'a str,
        name: &'a str,
        info: &'a CommandInfo,
        arguments: ArgumentTable,
        announcements: &'a AnnouncementTable,
    },
    CommandGroup {
        module: &'a str,
        name: &'a str,
        info: &'a CommandGroupInfo,
        announcements: &'a AnnouncementTable,
    },
}

struct ModuleCursor<'a> {
    name: &'a str,
    announcements: &'a AnnouncementTable,
    commands: Iter<'a, String, CommandInfo>,
    groups: Iter<'a, String, CommandGroupInfo>,
    started: Instant,
}

impl<'a> ModuleCursor<'a> {
    fn new(name: &'a str, module: &'a ModuleCommands) -> Self {
        Self {
            name,
            announcements: &module.breaking_changes,
            commands: module.command_table.iter(),
            groups: module.command_group_table.iter(),
            started: Instant::now(),
        }
    }
}

/// Visits the core component (when selected), then every selected module's
/// commands followed by its command groups, in load order.
///
/// Arguments of each command are resolved through the loader as the command
/// is reached.
pub struct CommandTreeWalker<'a, L> {
    loader: &'a L,
    selection: &'a ModuleSelection,
    core: Option<&'a AnnouncementTable>,
    modules: std::slice::Iter<'a, ModuleCommands>,
    current: Option<ModuleCursor<'a>>,
}

impl<'a, L: CommandLoader> CommandTreeWalker<'a, L> {
    pub fn new(loader: &'a L, loaded: &'a LoadedCommands, selection: &'a ModuleSelection) -> Self {
        let core = selection
            .includes_core()
            .then_some(&loaded.core_breaking_changes);
        Self {
            loader,
            selection,
            core,
            modules: loaded.modules.iter(),
            current: None,
        }
    }
}

impl<'a, L: CommandLoader> Iterator for CommandTreeWalker<'a, L> {
    type Item = Result<WalkEntry<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(announcements) = self.core.take() {
            if announcements.is_empty() {
                debug!("core declares no breaking change announcements");
            }
            return Some(Ok(WalkEntry::Core { announcements }));
        }

        loop {
            if let Some(cursor) = &mut self.current {
                if let Some((name, info)) = cursor.commands.next() {
                    let (module, announcements) = (cursor.name, cursor.announcements);
                    let entry = self.loader.load_arguments(name).map(|arguments| {
                        WalkEntry::Command {
                            module,
                            name,
                            info,
                            arguments,
                            announcements,
                        }
                    });
                    return Some(entry);
                }

                if let Some((name, info)) = cursor.groups.next() {
                    return Some(Ok(WalkEntry::CommandGroup {
                        module: cursor.name,
                        name,
                        info,
                        announcements: cursor.announcements,
                    }));
                }

                info!(
                    module = cursor.name,
                    elapsed_ms = cursor.started.elapsed().as_millis(),
                    "collected module"
                );
                self.current = None;
            }

            let module = self.modules.next()?;
            let Some(name) = module.module_name() else {
                debug!(
                    groups = module.command_group_table.len(),
                    announcements = module.breaking_changes.len(),
                    "skipping loader without commands; its owning module is unknown"
                );
                continue;
            };
            if !self.selection.contains(name) {
                continue;
            }
            if module.breaking_changes.is_empty() {
                debug!(module = name, "module declares no breaking change announcements");
            }
            self.current = Some(ModuleCursor::new(name, module));
        }
    }
}
