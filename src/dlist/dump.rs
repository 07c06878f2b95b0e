use anyhow::Result;
use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};
use std::io::{stderr, Write};

use super::DList;

/// Bound a pooled node can act as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Front,
    ListStart,
    ListEnd,
    Tail,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Front => "front",
            Role::ListStart => "list_start",
            Role::ListEnd => "list_end",
            Role::Tail => "tail",
        }
    }

    fn color(&self) -> Color {
        match self {
            Role::Front | Role::Tail => Color::DarkYellow,
            Role::ListStart | Role::ListEnd => Color::Green,
        }
    }
}

/// Snapshot of one pooled node, in chain order starting at `front`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot {
    pub position: usize,
    pub live: bool,
    pub roles: Vec<Role>,
}

impl<T> DList<T> {
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::with_capacity(self.capacity);
        let mut node_addr = self.front;
        let mut live = false;
        for position in 0..self.capacity {
            if node_addr == self.list_start && !self.is_empty() {
                live = true;
            }
            let roles = [
                (self.front, Role::Front),
                (self.list_start, Role::ListStart),
                (self.list_end, Role::ListEnd),
                (self.tail, Role::Tail),
            ]
            .into_iter()
            .filter(|(bound, _)| *bound == node_addr)
            .map(|(_, role)| role)
            .collect();
            slots.push(Slot {
                position,
                live,
                roles,
            });
            if node_addr == self.list_end {
                live = false;
            }
            node_addr = self.next(node_addr);
        }
        slots
    }

    /// Writes the pool layout to `w`, one line per node with its bound labels.
    pub fn dump<W: Write>(&self, w: &mut W) -> Result<()> {
        queue!(
            w,
            Print("========= Pool =========\n"),
            Print(format!("len:  {}\n", self.len)),
            Print(format!("cap:  {}\n", self.capacity))
        )?;
        for slot in self.slots() {
            let state = if slot.live { "live " } else { "spare" };
            queue!(w, Print(format!("pool[{}]: {state}", slot.position)))?;
            for role in &slot.roles {
                queue!(
                    w,
                    Print(" "),
                    SetForegroundColor(role.color()),
                    Print(role.label()),
                    ResetColor
                )?;
            }
            queue!(w, Print("\n"))?;
        }
        queue!(w, Print("======= End Pool =======\n"))?;
        w.flush()?;
        Ok(())
    }

    pub fn dump_stderr(&self) -> Result<()> {
        self.dump(&mut stderr())
    }
}

#[cfg(test)]
mod tests {
    use super::{Role, Slot};
    use crate::dlist::DList;

    #[test]
    fn test_slots_fresh() {
        let list = DList::<char>::with_capacity(3);
        assert_eq!(
            list.slots(),
            vec![
                Slot {
                    position: 0,
                    live: false,
                    roles: vec![Role::Front, Role::ListStart, Role::ListEnd],
                },
                Slot {
                    position: 1,
                    live: false,
                    roles: vec![],
                },
                Slot {
                    position: 2,
                    live: false,
                    roles: vec![Role::Tail],
                },
            ]
        );
    }

    #[test]
    fn test_slots_window() {
        let mut list = DList::with_capacity(5);
        list.extend(['a', 'b', 'c']);
        list.remove_lo();
        let live: Vec<bool> = list.slots().iter().map(|slot| slot.live).collect();
        assert_eq!(live, vec![false, true, true, false, false]);
        let slots = list.slots();
        assert_eq!(slots[1].roles, vec![Role::ListStart]);
        assert_eq!(slots[2].roles, vec![Role::ListEnd]);
        assert_eq!(slots[4].roles, vec![Role::Tail]);
    }

    #[test]
    fn test_dump() {
        let mut list = DList::with_capacity(2);
        list.extend([1, 2, 3]);
        let mut buf = Vec::new();
        list.dump(&mut buf).unwrap();
        let out = String::from_utf8(buf).unwrap();
        assert!(out.contains("len:  3"));
        assert!(out.contains("cap:  3"));
        assert!(out.contains("pool[0]: live"));
        assert!(out.contains("list_start"));
        assert!(out.contains("list_end"));
        assert!(out.contains("tail"));
        assert_eq!(out.lines().filter(|l| l.starts_with("pool[")).count(), 3);
    }
}
