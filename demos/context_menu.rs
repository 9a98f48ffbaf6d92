use std::cell::RefCell;
use std::rc::Rc;

use egui::{CentralPanel, Color32, Sense};
use egui_context_menu::{
    ContextMenu, EguiMenuLayer, EguiSurface, MenuHost, MenuItem, MenuOptions, MenuStyle,
};

struct DemoApp {
    host: MenuHost,
    layer: EguiMenuLayer,
    menu: ContextMenu<usize>,
    status: Rc<RefCell<String>>,
}

impl DemoApp {
    fn new() -> Self {
        let (host, layer) = EguiSurface::host(MenuStyle::default());
        let status = Rc::new(RefCell::new(String::from("Right-click anywhere")));

        let on_click = status.clone();
        let on_cancel = status.clone();
        let menu = ContextMenu::new(
            &host,
            MenuOptions::new()
                .data(0)
                .on_click(move |item, _event| {
                    *on_click.borrow_mut() = format!("Clicked {}", item.content().display_text());
                })
                .on_cancel(move || *on_cancel.borrow_mut() = "Menu dismissed".to_string()),
        );

        menu.add_item(MenuItem::text("Copy"))
            .add_item(MenuItem::text("Paste"))
            .add_item(MenuItem::blank())
            .add_item(MenuItem::html("<b>Delete</b> <i>permanently</i>"))
            .add_item(MenuItem::html(r#"<a href="https://github.com/emilk/egui">egui on GitHub</a>"#));

        Self {
            host,
            layer,
            menu,
            status,
        }
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        CentralPanel::default().show(ctx, |ui| {
            ui.colored_label(Color32::GRAY, self.status.borrow().as_str());

            let response = ui.interact(ui.max_rect(), ui.id().with("canvas"), Sense::click());
            if response.secondary_clicked() {
                if let Some(pos) = ctx.pointer_interact_pos() {
                    let opened = self.menu.data().unwrap_or(0) + 1;
                    self.menu.set_data(opened).show_at(pos);
                }
            }
        });

        self.layer.show(ctx, &self.host);
    }
}

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Context menu demo",
        options,
        Box::new(|_cc| Ok(Box::new(DemoApp::new()))),
    )
}
