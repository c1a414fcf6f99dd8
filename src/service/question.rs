use crate::types::hiring::AnswerPayload;

/// MySQL answer for Question 1: highest salary not paid on the 1st of a month.
pub const QUESTION_ONE_SQL: &str = "SELECT p.amount AS SALARY,
       CONCAT(e.first_name, ' ', e.last_name) AS NAME,
       TIMESTAMPDIFF(YEAR, e.dob, CURDATE()) AS AGE,
       d.department_name AS DEPARTMENT_NAME
FROM payments p
JOIN employee e ON p.emp_id = e.emp_id
JOIN department d ON e.department = d.department_id
WHERE DAY(p.payment_time) <> 1
  AND p.amount = (
      SELECT MAX(amount) FROM payments WHERE DAY(payment_time) <> 1
  );";

/// Which assignment a registration number maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    /// Odd registration numbers.
    One,
    /// Even registration numbers.
    Two,
}

impl Question {
    pub fn for_reg_no(reg_no: &str) -> Self {
        if is_reg_no_odd(reg_no) {
            Question::One
        } else {
            Question::Two
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Question::One => "ODD (Question 1)",
            Question::Two => "EVEN (Question 2)",
        }
    }

    /// Answer submitted for this question.
    ///
    /// Only the Question 1 query exists, so both variants submit it.
    pub fn answer(self) -> AnswerPayload {
        AnswerPayload {
            final_query: QUESTION_ONE_SQL.to_string(),
        }
    }
}

/// Parity of the last one or two digits of `reg_no`; no digits counts as odd.
pub fn is_reg_no_odd(reg_no: &str) -> bool {
    let digits: String = reg_no.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return true;
    }
    let tail = &digits[digits.len().saturating_sub(2)..];
    tail.parse::<u32>().map_or(true, |value| value % 2 != 0)
}
