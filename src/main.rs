//! 程序入口：初始化日志、加载 Slint UI，并绑定 SchemaTree 回调

use std::{cell::RefCell, rc::Rc};

use slint::{ComponentHandle, Model, ModelRc, SharedString, VecModel};
use tracing_subscriber::fmt::SubscriberBuilder;

use json_schema_builder::model::field_rows::{flatten_fields, FieldRow};
use json_schema_builder::utils::clipboard::copy_to_clipboard;
use json_schema_builder::vm::bridge::*;
use json_schema_builder::{FieldPath, FieldType, SchemaError, SchemaTree};

slint::include_modules!();

// FieldRowData转换实现
impl From<&FieldRow> for FieldRowData {
    /// 将Rust FieldRow转换为Slint可用的数据结构
    fn from(row: &FieldRow) -> Self {
        Self {
            id: row.id.to_string().into(),
            path: row.path.to_string().into(),
            name: row.name.clone().into(),
            kind: row.kind.as_str().into(),
            required: row.required,
            depth: row.depth as i32,
            nested: row.is_nested(),
        }
    }
}

/// VM桥接器：管理UI与SchemaTree的交互
struct ViewModelBridge {
    schema: Rc<RefCell<SchemaTree>>,
    rows: Rc<VecModel<FieldRowData>>,
}

impl ViewModelBridge {
    /// 创建新的VM桥接器并绑定所有回调
    fn new(app_window: &AppWindow, schema: Rc<RefCell<SchemaTree>>) -> Self {
        let bridge = Self {
            schema,
            rows: Rc::new(VecModel::default()),
        };

        app_window.set_field_rows(ModelRc::from(bridge.rows.clone()));
        bridge.setup_callbacks(app_window);
        bridge
    }

    /// 设置所有UI回调函数
    fn setup_callbacks(&self, app_window: &AppWindow) {
        // === 新增顶层字段 ===
        {
            let schema = self.schema.clone();
            let rows = self.rows.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_add_field(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::apply(&app_window, &schema, &rows, |tree| {
                        tree.add_field()?;
                        Ok(Some(STATUS_FIELD_ADDED))
                    });
                }
            });
        }

        // === 新增子字段 ===
        {
            let schema = self.schema.clone();
            let rows = self.rows.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_add_child(move |path| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::apply(&app_window, &schema, &rows, |tree| {
                        tree.add_child_at(&path.parse::<FieldPath>()?)?;
                        Ok(Some(STATUS_CHILD_ADDED))
                    });
                }
            });
        }

        // === 字段名输入（逐键触发，不刷新状态栏） ===
        {
            let schema = self.schema.clone();
            let rows = self.rows.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_rename_field(move |path, name| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::apply(&app_window, &schema, &rows, |tree| {
                        tree.rename_at(&path.parse::<FieldPath>()?, name.as_str())?;
                        Ok(None)
                    });
                }
            });
        }

        // === 类型切换 ===
        {
            let schema = self.schema.clone();
            let rows = self.rows.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_change_type(move |path, kind| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::apply(&app_window, &schema, &rows, |tree| {
                        let kind = kind.parse::<FieldType>()?;
                        tree.set_type_at(&path.parse::<FieldPath>()?, kind)?;
                        Ok(None)
                    });
                }
            });
        }

        // === 必填开关 ===
        {
            let schema = self.schema.clone();
            let rows = self.rows.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_toggle_required(move |path, required| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::apply(&app_window, &schema, &rows, |tree| {
                        tree.set_required_at(&path.parse::<FieldPath>()?, required)?;
                        Ok(None)
                    });
                }
            });
        }

        // === 删除字段（连同子树） ===
        {
            let schema = self.schema.clone();
            let rows = self.rows.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_delete_field(move |path| {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::apply(&app_window, &schema, &rows, |tree| {
                        tree.delete_at(&path.parse::<FieldPath>()?)?;
                        Ok(Some(STATUS_FIELD_DELETED))
                    });
                }
            });
        }

        // === 提交 ===
        {
            let schema = self.schema.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_submit_schema(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_submit(&app_window, &schema);
                }
            });
        }

        // === 复制预览 ===
        {
            let schema = self.schema.clone();
            let app_window_weak = app_window.as_weak();
            app_window.on_copy_preview(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    Self::handle_copy_preview(&app_window, &schema);
                }
            });
        }

        // === 消息对话框回调 ===
        {
            let app_window_weak = app_window.as_weak();
            app_window.on_close_message_dialog(move || {
                if let Some(app_window) = app_window_weak.upgrade() {
                    app_window.set_message_dialog_visible(false);
                }
            });
        }
    }

    /// 初始化UI状态
    fn initialize_ui(&self, app_window: &AppWindow) {
        let options: Vec<SharedString> = field_type_options().into_iter().map(Into::into).collect();
        app_window.set_field_types(ModelRc::new(VecModel::from(options)));
        app_window.set_indent_per_level(INDENT_PER_LEVEL);
        app_window.set_status_message(STATUS_READY.into());
        Self::refresh_view(app_window, &self.schema, &self.rows);
    }

    /// 执行一次树变更；成功后刷新行模型与预览，失败时写入状态栏
    fn apply<F>(
        app_window: &AppWindow,
        schema: &Rc<RefCell<SchemaTree>>,
        rows: &Rc<VecModel<FieldRowData>>,
        op: F,
    ) where
        F: FnOnce(&mut SchemaTree) -> Result<Option<&'static str>, SchemaError>,
    {
        let result = op(&mut *schema.borrow_mut());
        match result {
            Ok(status) => {
                Self::refresh_view(app_window, schema, rows);
                if let Some(status) = status {
                    app_window.set_status_message(status.into());
                }
            }
            Err(e) => {
                app_window.set_status_message(error_status(&e).into());
                tracing::error!("字段树操作失败: {}", e);
            }
        }
    }

    /// 用最新快照重建行模型并刷新预览
    fn refresh_view(
        app_window: &AppWindow,
        schema: &Rc<RefCell<SchemaTree>>,
        rows: &Rc<VecModel<FieldRowData>>,
    ) {
        let state = schema.borrow();
        let row_data: Vec<FieldRowData> = flatten_fields(state.fields())
            .iter()
            .map(FieldRowData::from)
            .collect();
        Self::sync_rows(rows, row_data);
        app_window.set_preview_text(state.preview().into());
    }

    /// 行结构不变时逐行更新，保证正在输入的文本框不丢失焦点；否则整体替换
    fn sync_rows(model: &VecModel<FieldRowData>, row_data: Vec<FieldRowData>) {
        let same_shape = model.row_count() == row_data.len()
            && row_data
                .iter()
                .enumerate()
                .all(|(i, row)| model.row_data(i).is_some_and(|old| old.id == row.id));

        if same_shape {
            for (i, row) in row_data.into_iter().enumerate() {
                if model.row_data(i).as_ref() != Some(&row) {
                    model.set_row_data(i, row);
                }
            }
        } else {
            model.set_vec(row_data);
        }
    }

    /// 处理提交：记录字段树与生成的JSON，并弹出确认
    fn handle_submit(app_window: &AppWindow, schema: &Rc<RefCell<SchemaTree>>) {
        match schema.borrow().submit() {
            Ok(submission) => {
                app_window.set_message_dialog_title(SUBMIT_DIALOG_TITLE.into());
                app_window.set_message_dialog_text(SUBMIT_DIALOG_TEXT.into());
                app_window.set_message_dialog_visible(true);
                app_window.set_status_message(
                    format!("{}（{} 个顶层键）", STATUS_SUBMITTED, submission.document.len()).into(),
                );
            }
            Err(e) => {
                app_window.set_status_message(error_status(&e).into());
                tracing::error!("提交失败: {}", e);
            }
        }
    }

    /// 复制当前预览文本
    fn handle_copy_preview(app_window: &AppWindow, schema: &Rc<RefCell<SchemaTree>>) {
        let preview = schema.borrow().preview().to_string();
        match copy_to_clipboard(&preview) {
            Ok(()) => {
                app_window.set_status_message(STATUS_COPIED.into());
                tracing::info!("预览已复制到剪贴板，长度: {} 字符", preview.len());
            }
            Err(e) => {
                app_window.set_status_message(error_status(&e).into());
                tracing::error!("复制失败: {}", e);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    // 初始化日志输出
    let _ = SubscriberBuilder::default()
        .with_max_level(tracing::Level::INFO)
        .try_init();

    let app = AppWindow::new()?;
    let schema = Rc::new(RefCell::new(SchemaTree::new()));

    // 创建VM桥接器并绑定UI回调
    let bridge = ViewModelBridge::new(&app, schema);
    bridge.initialize_ui(&app);

    tracing::info!("应用启动成功，UI已初始化");
    app.run()?;
    Ok(())
}
