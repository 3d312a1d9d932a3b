use std::time::Duration;

use egui::{ComboBox, DragValue, RichText, ScrollArea, TopBottomPanel};

use npc_core::{NpcHandle, Position, RayHit};

use crate::actions::{dispatch, AppAction};
use crate::state::AppState;

pub fn launch() -> eframe::Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "npc-workbench",
        options,
        Box::new(|_cc| Box::<WorkbenchApp>::default()),
    )
}

#[derive(Default)]
pub struct WorkbenchApp {
    state: AppState,
}

impl WorkbenchApp {
    fn run_action(&mut self, action: AppAction) {
        if let Err(err) = dispatch(&mut self.state, action) {
            tracing::warn!(error = %err, "action failed");
            self.state.set_status(err.to_string());
        }
    }

    fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (undo, redo) = ctx.input(|i| {
            let cmd = i.modifiers.command;
            (
                cmd && !i.modifiers.shift && i.key_pressed(egui::Key::Z),
                (cmd && i.key_pressed(egui::Key::Y))
                    || (cmd && i.modifiers.shift && i.key_pressed(egui::Key::Z)),
            )
        });
        if undo {
            self.run_action(AppAction::Undo);
        }
        if redo {
            self.run_action(AppAction::Redo);
        }
    }

    fn draw_menu(&mut self, ui: &mut egui::Ui) {
        let history = self.state.history_state();
        egui::menu::bar(ui, |ui| {
            ui.menu_button("Edit", |ui| {
                if ui
                    .add_enabled(history.can_undo, egui::Button::new("Undo (Ctrl-Z)"))
                    .clicked()
                {
                    ui.close_menu();
                    self.run_action(AppAction::Undo);
                }
                if ui
                    .add_enabled(history.can_redo, egui::Button::new("Redo (Ctrl-Y)"))
                    .clicked()
                {
                    ui.close_menu();
                    self.run_action(AppAction::Redo);
                }
                if ui.button("Clear history").clicked() {
                    ui.close_menu();
                    self.run_action(AppAction::ClearHistory);
                }
            });
        });
    }

    fn draw_spawn_form(&mut self, ui: &mut egui::Ui) {
        ui.heading("Spawn");
        let mut position = self.state.spawn_position;
        ui.horizontal(|ui| {
            ui.label("x");
            ui.add(DragValue::new(&mut position.x).speed(0.1));
            ui.label("y");
            ui.add(DragValue::new(&mut position.y).speed(0.1));
            ui.label("z");
            ui.add(DragValue::new(&mut position.z).speed(0.1));
        });
        if position != self.state.spawn_position {
            self.run_action(AppAction::SetSpawnPosition(position));
        }

        let mut persona = self.state.spawn_persona;
        let current = persona
            .and_then(|idx| self.state.personas.get(idx))
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "default".to_string());
        ComboBox::from_label("Persona")
            .selected_text(current)
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut persona, None, "default");
                for (idx, p) in self.state.personas.iter().enumerate() {
                    ui.selectable_value(&mut persona, Some(idx), p.name.as_str());
                }
            });
        if persona != self.state.spawn_persona {
            self.run_action(AppAction::SelectPersona(persona));
        }

        let mut variant = self.state.spawn_variant;
        let max_variant = self.state.roster.config().variant_count.saturating_sub(1);
        ui.add(
            DragValue::new(&mut variant)
                .clamp_range(0..=max_variant)
                .prefix("variant "),
        );
        if variant != self.state.spawn_variant {
            self.run_action(AppAction::SetVariant(variant));
        }

        let history = self.state.history_state();
        ui.horizontal(|ui| {
            if ui.button("Spawn").clicked() {
                self.run_action(AppAction::Spawn);
            }
            if ui.add_enabled(history.can_undo, egui::Button::new("Undo")).clicked() {
                self.run_action(AppAction::Undo);
            }
            if ui.add_enabled(history.can_redo, egui::Button::new("Redo")).clicked() {
                self.run_action(AppAction::Redo);
            }
        });
    }

    fn draw_npc_list(&mut self, ui: &mut egui::Ui, dt: Duration) {
        ui.heading("NPCs");
        ui.separator();

        let active = self.state.targeting.active();
        let selected = self.state.selected;
        let mut clicked = None;
        let mut hovered = None;
        ScrollArea::vertical().show(ui, |ui| {
            for record in self.state.records() {
                let marker = if Some(record.handle) == active { "▶ " } else { "" };
                let label = format!(
                    "{marker}{} | {} | variant {} | {}",
                    record.handle, record.persona, record.variant_index, record.position
                );
                let response = ui.selectable_label(selected == Some(record.handle), label);
                if response.hovered() {
                    hovered = Some(RayHit {
                        handle: record.handle,
                        distance: distance_from_origin(record.position),
                    });
                }
                if response.clicked() {
                    clicked = Some(record.handle);
                }
            }
        });

        // Hovering a row stands in for the camera ray.
        self.run_action(AppAction::Aim(hovered, dt));
        if let Some(handle) = clicked {
            self.run_action(AppAction::SelectNpc(Some(handle)));
        }
    }

    fn draw_persona_switch(&mut self, ui: &mut egui::Ui) {
        let Some(record) = self.state.selected_record() else {
            ui.label("Select an NPC to change its persona.");
            return;
        };
        let handle: NpcHandle = record.handle;
        ui.label(format!("{handle}: {}", record.persona));

        let mut choice = None::<Option<usize>>;
        ui.horizontal_wrapped(|ui| {
            if ui.button("default").clicked() {
                choice = Some(None);
            }
            for (idx, persona) in self.state.personas.iter().enumerate() {
                if ui.button(persona.name.as_str()).clicked() {
                    choice = Some(Some(idx));
                }
            }
        });
        if let Some(index) = choice {
            self.run_action(AppAction::SwitchPersona(index));
        }
    }

    fn draw_history(&mut self, ui: &mut egui::Ui) {
        ui.heading("History");
        for label in self.state.history.undo_labels().iter().rev() {
            ui.label(label.as_str());
        }
        for label in self.state.history.redo_labels().iter().rev() {
            ui.label(RichText::new(label.as_str()).weak());
        }
    }
}

fn distance_from_origin(position: Position) -> f32 {
    (position.x * position.x + position.y * position.y + position.z * position.z).sqrt()
}

impl eframe::App for WorkbenchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_shortcuts(ctx);
        let dt = Duration::from_secs_f32(ctx.input(|i| i.stable_dt).max(0.0));

        TopBottomPanel::top("menu").show(ctx, |ui| self.draw_menu(ui));
        TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(self.state.status.as_str());
        });
        egui::SidePanel::left("spawn").show(ctx, |ui| {
            self.draw_spawn_form(ui);
            ui.separator();
            self.draw_history(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_npc_list(ui, dt);
            ui.separator();
            self.draw_persona_switch(ui);
        });

        // Keep the persistence timer ticking while the pointer rests.
        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
