/// Билет отложенной проверки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckTicket(u64);

/// Последовательность проверок для debounce по заднему фронту.
///
/// Каждое нажатие клавиши выдаёт новый билет; результат проверки
/// применяется только если его билет всё ещё последний.
#[derive(Debug, Clone, Default)]
pub struct CheckSequence {
    current: u64,
}

impl CheckSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Выдать новый билет, аннулировав все предыдущие
    pub fn next(&mut self) -> CheckTicket {
        self.current = self.current.wrapping_add(1);
        CheckTicket(self.current)
    }

    pub fn is_current(&self, ticket: CheckTicket) -> bool {
        self.current == ticket.0
    }

    /// Аннулировать ожидающие проверки без выдачи нового билета
    pub fn invalidate(&mut self) {
        self.current = self.current.wrapping_add(1);
    }
}
