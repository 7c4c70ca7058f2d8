use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use domain::{DeliveryTask, MessageId, RoomId, UserId};

/// 已创建但尚未开始投递的任务台账。
///
/// 扇出先登记任务，投递真正启动前必须先 claim 成功；
/// 成员离开房间时 purge 掉该用户在该房间所有尚未启动的任务。
/// 已经 claim 的任务按快照语义继续投递，不受 purge 影响。
#[derive(Debug, Default)]
pub struct PendingDeliveries {
    inner: Mutex<HashMap<(UserId, RoomId), HashSet<MessageId>>>,
}

impl PendingDeliveries {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一个刚创建的投递任务。
    pub fn enqueue(&self, task: &DeliveryTask) {
        let mut inner = self.inner.lock().unwrap();
        inner
            .entry((task.target_user_id, task.message.room_id))
            .or_default()
            .insert(task.message.id);
    }

    /// 领取任务。返回 `true` 表示任务仍然在队列中，可以开始投递；
    /// 返回 `false` 表示任务已被 purge，必须丢弃。
    pub fn claim(&self, task: &DeliveryTask) -> bool {
        let mut inner = self.inner.lock().unwrap();
        let key = (task.target_user_id, task.message.room_id);
        match inner.get_mut(&key) {
            Some(queued) => {
                let present = queued.remove(&task.message.id);
                if queued.is_empty() {
                    inner.remove(&key);
                }
                present
            }
            None => false,
        }
    }

    /// 清除某个用户在某个房间的全部排队任务，返回清除数量。
    pub fn purge(&self, user_id: UserId, room_id: RoomId) -> usize {
        let mut inner = self.inner.lock().unwrap();
        inner
            .remove(&(user_id, room_id))
            .map(|queued| queued.len())
            .unwrap_or(0)
    }

    /// 某个用户在某个房间还排着多少任务。
    pub fn queued_for(&self, user_id: UserId, room_id: RoomId) -> usize {
        let inner = self.inner.lock().unwrap();
        inner
            .get(&(user_id, room_id))
            .map(|queued| queued.len())
            .unwrap_or(0)
    }
}
