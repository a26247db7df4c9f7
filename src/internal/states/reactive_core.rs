//! # ReactiveProperty — 可监听的值单元
//!
//! 登记表中每个下载的状态与整体进度各占一个属性：分片任务同步写入，调用方通过
//! [`ReactiveProperty::watch`] 拿到 [`PropertyWatcher`] 异步等待变化。
//!
//! 属性随登记记录一起销毁；销毁后写入失败，监听者被唤醒并收到 [`ReactivePropertyError::Destroyed`]。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::watch;

#[derive(Debug, Error)]
pub enum ReactivePropertyError {
    /// 所属下载已从登记表移除或被替换
    #[error("属性已被销毁")]
    Destroyed,

    #[error("监听通道已关闭: {0}")]
    Closed(#[from] watch::error::RecvError),
}

/// `None` 表示已销毁，监听者据此区分「值变化」与「属性消失」。
#[derive(Debug)]
struct Cell<T> {
    tx: watch::Sender<Option<T>>,
    destroyed: AtomicBool,
}

impl<T> Cell<T> {
    fn destroy(&self) {
        if !self.destroyed.swap(true, Ordering::AcqRel) {
            self.tx.send_replace(None);
        }
    }
}

impl<T> Drop for Cell<T> {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// 同步写、异步监听的属性。克隆共享同一个值。
#[derive(Clone, Debug)]
pub struct ReactiveProperty<T: Clone + Send + Sync> {
    cell: Arc<Cell<T>>,
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(initial: T) -> Self {
        let (tx, _) = watch::channel(Some(initial));
        Self {
            cell: Arc::new(Cell {
                tx,
                destroyed: AtomicBool::new(false),
            }),
        }
    }

    fn ensure_alive(&self) -> Result<(), ReactivePropertyError> {
        if self.is_destroyed() {
            Err(ReactivePropertyError::Destroyed)
        } else {
            Ok(())
        }
    }

    /// 整体替换并通知所有监听者。
    pub fn update(&self, value: T) -> Result<(), ReactivePropertyError> {
        self.ensure_alive()?;
        self.cell.tx.send_replace(Some(value));
        Ok(())
    }

    /// 在发送端锁内原地修改，多个分片任务并发累加进度不会互相覆盖。
    pub fn update_field<F>(&self, modify: F) -> Result<(), ReactivePropertyError>
    where
        F: FnOnce(&mut T),
    {
        self.ensure_alive()?;
        self.cell.tx.send_modify(|slot| {
            if let Some(value) = slot {
                modify(value);
            }
        });
        Ok(())
    }

    /// 条件迁移：`decide` 看到当前值后返回新值才写入并通知，返回 `None` 则保持不变。
    ///
    /// 读取与写入在同一把锁内完成，并发调用时同一次迁移只会成功一次。
    pub fn replace_if<F>(&self, decide: F) -> Result<bool, ReactivePropertyError>
    where
        F: FnOnce(&T) -> Option<T>,
    {
        self.ensure_alive()?;
        let replaced = self.cell.tx.send_if_modified(|slot| {
            match slot.as_ref().and_then(decide) {
                Some(next) => {
                    *slot = Some(next);
                    true
                }
                None => false,
            }
        });
        Ok(replaced)
    }

    /// 当前值；已销毁时为 `None`。
    pub fn get_current(&self) -> Option<T> {
        self.cell.tx.borrow().clone()
    }

    pub fn get_or_default(&self) -> T
    where
        T: Default,
    {
        self.get_current().unwrap_or_default()
    }

    pub fn destroy(&self) {
        self.cell.destroy();
    }

    pub fn is_destroyed(&self) -> bool {
        self.cell.destroyed.load(Ordering::Acquire)
    }

    pub fn watch(&self) -> PropertyWatcher<T> {
        PropertyWatcher {
            rx: self.cell.tx.subscribe(),
        }
    }
}

/// 属性的监听端，只能观察到创建之后的变化。
pub struct PropertyWatcher<T> {
    rx: watch::Receiver<Option<T>>,
}

impl<T> PropertyWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 等待下一次变化并返回新值。
    pub async fn changed(&mut self) -> Result<T, ReactivePropertyError> {
        self.rx.changed().await?;
        self.rx
            .borrow_and_update()
            .clone()
            .ok_or(ReactivePropertyError::Destroyed)
    }

    /// 等到值满足 `predicate` 为止，当前值已满足则立即返回。
    pub async fn wait_until<F>(&mut self, mut predicate: F) -> Result<T, ReactivePropertyError>
    where
        F: FnMut(&T) -> bool,
    {
        let mut current = self.borrow().ok_or(ReactivePropertyError::Destroyed)?;
        while !predicate(&current) {
            current = self.changed().await?;
        }
        Ok(current)
    }

    pub fn borrow(&self) -> Option<T> {
        self.rx.borrow().clone()
    }
}
