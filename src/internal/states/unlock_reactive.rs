//! # UnlockReactiveProperty
//!
//! 登记表对外暴露的响应式属性：写入不经过 async 锁，分片读循环可以直接更新进度。

pub use super::reactive_core::{PropertyWatcher, ReactivePropertyError as UnlockReactivePropertyError};

pub type UnlockReactiveProperty<T> = super::reactive_core::ReactiveProperty<T>;
